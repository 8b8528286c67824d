mod common;

use std::path::PathBuf;

use clap::Parser;
use common::{
    ViewerArgs, camera, color_view, open_window, sync_camera, to_mat4, update_controls,
    wireframe_view,
};
use meshview::{
    Controls, ImageLoader, TextureImage, TextureLoader,
    primitive::{cube_mesh, plane_mesh},
};
use three_d::{AmbientLight, ClearState, FrameOutput, Object, Srgba};

/// A textured cube above a floor, rotated by dragging the mouse.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    #[clap(flatten)]
    viewer: ViewerArgs,
    #[clap(long)]
    cube_texture: Option<PathBuf>,
    #[clap(long)]
    floor_texture: Option<PathBuf>,
}

fn load_texture(path: &Option<PathBuf>) -> Result<Option<TextureImage>, meshview::Error> {
    path.as_deref()
        .map(|p| ImageLoader::new(true).load(p))
        .transpose()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.viewer.load_config()?;
    let cube_texture = load_texture(&args.cube_texture)?;
    let floor_texture = load_texture(&args.floor_texture)?;
    let window = open_window(&config.window)?;
    let context = window.gl();
    let mut controls = Controls::from_config(&config);
    let mut camera = camera(&window, &controls.transformations);
    let (cube, plane) = (cube_mesh(), plane_mesh());
    let mut solids = vec![
        color_view(&context, &cube, [0.8, 0.6, 0.3, 1.0], cube_texture.as_ref()),
        color_view(&context, &plane, [0.5, 0.5, 0.5, 1.0], floor_texture.as_ref()),
    ];
    let mut wires = vec![
        wireframe_view(&context, &cube, 0.01),
        wireframe_view(&context, &plane, 0.01),
    ];
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
            let model = to_mat4(xf.model());
            solids.iter_mut().for_each(|s| s.set_transformation(model));
            wires.iter_mut().for_each(|w| w.set_transformation(model));
            let objects: Vec<&dyn Object> = if config.wireframe {
                wires.iter().map(|w| w as &dyn Object).collect()
            } else {
                solids.iter().map(|s| s as &dyn Object).collect()
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
