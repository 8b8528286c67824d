mod common;

use std::path::PathBuf;

use clap::Parser;
use common::{ViewerArgs, color_view, open_window, to_mat4, to_vec3};
use meshview::{
    ImageLoader, TextureImage, TextureLoader, ViewerEvent,
    consts::{CAMERA_POSITION, FOV_DEFAULT, Z_FAR, Z_NEAR},
    primitive::{CUBE_POSITIONS, cube_mesh, cube_model_matrix},
};
use three_d::{AmbientLight, Camera, ClearState, FrameOutput, Srgba, degrees, vec3};

/// Ten cubes placed around the world.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    #[clap(flatten)]
    viewer: ViewerArgs,
    /// Base texture of the cubes.
    #[clap(long)]
    texture1: Option<PathBuf>,
    /// Texture blended on top of the base texture.
    #[clap(long)]
    texture2: Option<PathBuf>,
}

/// Share of the second texture in the blend.
const MIX: f32 = 0.2;

fn load_texture(path: &Option<PathBuf>) -> Result<Option<TextureImage>, meshview::Error> {
    path.as_deref()
        .map(|p| ImageLoader::new(true).load(p))
        .transpose()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.viewer.load_config()?;
    let texture = match (load_texture(&args.texture1)?, load_texture(&args.texture2)?) {
        (Some(a), Some(b)) => Some(a.mix(&b, MIX)?),
        (a, b) => a.or(b),
    };
    if texture.is_none() {
        log::info!("No textures given, drawing flat cubes");
    }
    let window = open_window(&config.window)?;
    let context = window.gl();
    let mut camera = Camera::new_perspective(
        window.viewport(),
        -to_vec3(CAMERA_POSITION),
        vec3(0.0, 0.0, 0.0),
        vec3(0.0, 1.0, 0.0),
        degrees(FOV_DEFAULT),
        Z_NEAR,
        Z_FAR,
    );
    let mesh = cube_mesh();
    let color = match texture {
        Some(_) => [1.0; 4],
        None => [0.8, 0.6, 0.3, 1.0],
    };
    let cubes: Vec<_> = (0..CUBE_POSITIONS.len())
        .filter_map(cube_model_matrix)
        .map(|model| {
            let mut cube = color_view(&context, &mesh, color, texture.as_ref());
            cube.set_transformation(to_mat4(model));
            cube
        })
        .collect();
    let ambient = AmbientLight::new(&context, 1.0, Srgba::WHITE);
    let [r, g, b, a] = config.clear_color;
    window.render_loop(move |frame_input| {
        camera.set_viewport(frame_input.viewport);
        let exit = common::viewer_events(&frame_input.events).contains(&ViewerEvent::Escape);
        frame_input
            .screen()
            .clear(ClearState::color_and_depth(r, g, b, a, 1.0))
            .render(&camera, cubes.iter().flat_map(|c| c.into_iter()), &[&ambient]);
        FrameOutput {
            exit,
            ..Default::default()
        }
    });
    Ok(())
}
