mod common;

use std::path::PathBuf;

use clap::Parser;
use common::{
    ViewerArgs, camera, color_view, open_window, sync_camera, to_mat4, update_controls,
    wireframe_view,
};
use meshview::{Controls, ImageLoader, MeshH, Model};
use three_d::{AmbientLight, ClearState, FrameOutput, Object, Srgba};

/// Draws an OBJ model with its diffuse textures.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    #[clap(flatten)]
    viewer: ViewerArgs,
    /// The OBJ file. Textures are looked up in the `textures` directory next
    /// to it.
    model: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.viewer.load_config()?;
    let model = Model::load(&args.model, &mut ImageLoader::new(false))?;
    let stats = model.stats();
    log::info!(
        "{} meshes, {} vertices, {} triangles, {} textures",
        stats.meshes,
        stats.vertices,
        stats.triangles,
        stats.textures
    );
    let window = open_window(&config.window)?;
    let context = window.gl();
    let mut controls = Controls::from_config(&config);
    let mut camera = camera(&window, &controls.transformations);
    let mut solids = Vec::with_capacity(model.meshes().len());
    let mut wires = Vec::with_capacity(model.meshes().len());
    for (i, mesh) in model.meshes().iter().enumerate() {
        let placement = model
            .mesh_transform(MeshH::from(i))
            .unwrap_or(glam::Mat4::IDENTITY);
        // Only the first diffuse texture is drawn.
        let texture = match mesh.textures().first() {
            Some(&tex) => Some(&model.texture(tex)?.image),
            None => None,
        };
        solids.push((
            placement,
            color_view(&context, mesh, [1.0; 4], texture),
        ));
        wires.push((placement, wireframe_view(&context, mesh, 0.002)));
    }
    let ambient = AmbientLight::new(&context, 1.0, Srgba::WHITE);
    let [r, g, b, a] = config.clear_color;
    window.render_loop(move |frame_input| {
        let mut redraw = frame_input.first_frame;
        redraw |= camera.set_viewport(frame_input.viewport);
        redraw |= update_controls(
            &mut controls,
            &config,
            frame_input.viewport,
            &frame_input.events,
        );
        if redraw {
            let xf = &controls.transformations;
            sync_camera(&mut camera, xf);
            for (placement, solid) in solids.iter_mut() {
                solid.set_transformation(to_mat4(xf.model() * *placement));
            }
            for (placement, wire) in wires.iter_mut() {
                wire.set_transformation(to_mat4(xf.model() * *placement));
            }
            let objects: Vec<&dyn Object> = if config.wireframe {
                wires.iter().map(|(_, w)| w as &dyn Object).collect()
            } else {
                solids.iter().map(|(_, s)| s as &dyn Object).collect()
            };
            frame_input
                .screen()
                .clear(ClearState::color_and_depth(r, g, b, a, 1.0))
                .render(&camera, objects, &[&ambient]);
        }
        FrameOutput {
            exit: controls.should_close,
            swap_buffers: redraw,
            ..Default::default()
        }
    });
    Ok(())
}
