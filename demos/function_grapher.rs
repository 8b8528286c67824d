mod common;

use clap::Parser;
use common::{
    ViewerArgs, camera, color_view, open_window, sync_camera, to_mat4, update_controls,
    wireframe_view,
};
use meshview::{Controls, FLOOR_COLOR, FUNCTION_COLOR, FunctionMesh};
use three_d::{AmbientLight, ClearState, FrameOutput, Object, Srgba};

/// Graphs `y = x^2 + z^2` over the floor.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    #[clap(flatten)]
    viewer: ViewerArgs,
    /// Print the mesh summary and exit without opening a window.
    #[clap(long)]
    summary_only: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.viewer.load_config()?;
    let graph = FunctionMesh::with_options(
        |x: f64, z: f64| x * x + z * z,
        config.grapher.num_cells,
        config.grapher.domain,
    )?;
    println!("{}", graph.summary());
    if args.summary_only {
        return Ok(());
    }
    let floor = graph.floor_mesh();
    let function = graph.indexed_function_mesh()?;
    let window = open_window(&config.window)?;
    let context = window.gl();
    let mut controls = Controls::from_config(&config);
    let mut camera = camera(&window, &controls.transformations);
    let mut solids = vec![
        color_view(&context, &floor, FLOOR_COLOR.to_array(), None),
        color_view(&context, &function, FUNCTION_COLOR.to_array(), None),
    ];
    let mut wires = vec![
        wireframe_view(&context, &floor, 0.001),
        wireframe_view(&context, &function, 0.001),
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
            // The wireframe is drawn on top of the faces, so the cells stay
            // visible.
            let mut objects: Vec<&dyn Object> = solids.iter().map(|s| s as &dyn Object).collect();
            if config.wireframe {
                objects.extend(wires.iter().map(|w| w as &dyn Object));
            }
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
