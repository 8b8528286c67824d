mod common;

use clap::Parser;
use common::{ViewerArgs, open_window, srgba, to_vec3};
use meshview::primitive::{HELLO_COLORS, hello_mesh};
use three_d::{
    AmbientLight, Camera, ClearState, ColorMaterial, CpuMaterial, CpuMesh, FrameOutput, Gm,
    Indices, Mesh, Positions, Srgba, vec3,
};

/// Two triangles in two colors.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    #[clap(flatten)]
    viewer: ViewerArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.viewer.load_config()?;
    let window = open_window(&config.window)?;
    let context = window.gl();
    // The positions are in normalized device coordinates.
    let mut camera = Camera::new_orthographic(
        window.viewport(),
        vec3(0.0, 0.0, 1.0),
        vec3(0.0, 0.0, 0.0),
        vec3(0.0, 1.0, 0.0),
        2.0,
        0.1,
        10.0,
    );
    let mesh = hello_mesh();
    // The first three vertices belong to the first triangle.
    let colors = (0..mesh.num_vertices())
        .map(|i| srgba(HELLO_COLORS[usize::from(i >= 3)].to_array()))
        .collect();
    let cpumesh = CpuMesh {
        positions: Positions::F32(mesh.positions().map(to_vec3).collect()),
        indices: Indices::U32(mesh.indices().to_vec()),
        colors: Some(colors),
        ..Default::default()
    };
    let triangles = Gm::new(
        Mesh::new(&context, &cpumesh),
        ColorMaterial::new_opaque(
            &context,
            &CpuMaterial {
                albedo: Srgba::WHITE,
                ..Default::default()
            },
        ),
    );
    let ambient = AmbientLight::new(&context, 1.0, Srgba::WHITE);
    log::info!("Drawing {} triangles", mesh.num_triangles());
    let [r, g, b, a] = config.clear_color;
    window.render_loop(move |frame_input| {
        camera.set_viewport(frame_input.viewport);
        let exit = common::viewer_events(&frame_input.events)
            .contains(&meshview::ViewerEvent::Escape);
        frame_input
            .screen()
            .clear(ClearState::color_and_depth(r, g, b, a, 1.0))
            .render(&camera, &triangles, &[&ambient]);
        FrameOutput {
            exit,
            ..Default::default()
        }
    });
    Ok(())
}
