#![allow(dead_code)]

use std::{collections::HashSet, path::PathBuf};

use meshview::{
    Controls, IndexedMesh, TextureImage, Transformations, ViewerConfig, ViewerEvent, WindowConfig,
    consts::{Z_FAR, Z_NEAR},
};
use three_d::{
    Camera, ColorMaterial, Context, CpuMaterial, CpuMesh, CpuTexture, Cull, Event, Gm, Indices,
    InstancedMesh, Instances, Key, Mat4, Mesh, MouseButton, Positions, Quat, Srgba,
    TextureData, Vec3, Window, WindowError, WindowSettings, degrees, vec2, vec3,
};

/// Arguments shared by the viewers.
#[derive(clap::Args, Debug)]
pub struct ViewerArgs {
    /// TOML file with the viewer settings.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

impl ViewerArgs {
    pub fn load_config(&self) -> Result<ViewerConfig, meshview::Error> {
        ViewerConfig::load_or_default(self.config.as_deref())
    }
}

pub fn open_window(config: &WindowConfig) -> Result<Window, WindowError> {
    Window::new(WindowSettings {
        title: config.title.clone(),
        min_size: (256, 256),
        max_size: Some((config.width, config.height)),
        ..Default::default()
    })
}

pub fn to_mat4(m: glam::Mat4) -> Mat4 {
    Mat4::from(m.to_cols_array_2d())
}

pub fn to_vec3(v: glam::Vec3) -> Vec3 {
    vec3(v.x, v.y, v.z)
}

pub fn srgba(c: [f32; 4]) -> Srgba {
    let [r, g, b, a] = c.map(|x| (x.clamp(0.0, 1.0) * 255.0).round() as u8);
    Srgba::new(r, g, b, a)
}

pub fn cpu_mesh(mesh: &IndexedMesh) -> CpuMesh {
    CpuMesh {
        positions: Positions::F32(mesh.positions().map(to_vec3).collect()),
        indices: Indices::U32(mesh.indices().to_vec()),
        uvs: Some(
            mesh.vertices()
                .iter()
                .map(|v| vec2(v.tex_coords.x, v.tex_coords.y))
                .collect(),
        ),
        ..Default::default()
    }
}

pub fn cpu_texture(image: &TextureImage) -> CpuTexture {
    CpuTexture {
        data: TextureData::RgbaU8(image.to_rgba()),
        width: image.width,
        height: image.height,
        ..Default::default()
    }
}

pub fn color_view(
    context: &Context,
    mesh: &IndexedMesh,
    color: [f32; 4],
    texture: Option<&TextureImage>,
) -> Gm<Mesh, ColorMaterial> {
    let material = ColorMaterial::new_opaque(
        context,
        &CpuMaterial {
            albedo: srgba(color),
            albedo_texture: texture.map(cpu_texture),
            ..Default::default()
        },
    );
    Gm::new(Mesh::new(context, &cpu_mesh(mesh)), material)
}

/// Each edge of the triangles of `mesh` as an instanced cylinder.
pub fn wireframe_view(
    context: &Context,
    mesh: &IndexedMesh,
    radius: f32,
) -> Gm<InstancedMesh, ColorMaterial> {
    let mut edges = HashSet::new();
    for [a, b, c] in mesh.triangles() {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            edges.insert((u.min(v), u.max(v)));
        }
    }
    let verts = mesh.vertices();
    let transformations = edges
        .into_iter()
        .filter_map(|(u, v)| {
            let start = verts[u as usize].position;
            let end = verts[v as usize].position;
            let ev = end - start;
            let length = ev.length();
            if length <= f32::EPSILON {
                return None;
            }
            let dir = to_vec3(ev / length);
            Some(
                Mat4::from_translation(to_vec3(start))
                    * Into::<Mat4>::into(Quat::from_arc(vec3(1.0, 0.0, 0.0), dir, None))
                    * Mat4::from_nonuniform_scale(length, 1.0, 1.0),
            )
        })
        .collect();
    let mut cylinder = CpuMesh::cylinder(6);
    cylinder
        .transform(&Mat4::from_nonuniform_scale(1.0, radius, radius))
        .expect("Cannot scale the cylinder");
    let mut material = ColorMaterial::new_opaque(
        context,
        &CpuMaterial {
            albedo: Srgba::new_opaque(220, 220, 220),
            ..Default::default()
        },
    );
    material.render_states.cull = Cull::Back;
    Gm::new(
        InstancedMesh::new(
            context,
            &Instances {
                transformations,
                ..Default::default()
            },
            &cylinder,
        ),
        material,
    )
}

/// Translate the window events the viewers care about. Handled events are
/// skipped.
pub fn viewer_events(events: &[Event]) -> Vec<ViewerEvent> {
    events
        .iter()
        .filter_map(|event| match *event {
            Event::MouseMotion {
                button: Some(MouseButton::Left),
                delta,
                handled: false,
                ..
            } => Some(ViewerEvent::MouseDrag {
                dx: delta.0,
                dy: delta.1,
            }),
            // One notch per event, whatever the platform reports.
            Event::MouseWheel {
                delta,
                handled: false,
                ..
            } if delta.1 != 0.0 => Some(ViewerEvent::Scroll {
                dy: delta.1.signum(),
            }),
            Event::KeyPress {
                kind: Key::Escape,
                handled: false,
                ..
            } => Some(ViewerEvent::Escape),
            _ => None,
        })
        .collect()
}

/// Feed the frame's input to the controls. Returns true if anything changed.
pub fn update_controls(
    controls: &mut Controls,
    config: &ViewerConfig,
    viewport: three_d::Viewport,
    events: &[Event],
) -> bool {
    let mut redraw = false;
    if controls.window_size != (viewport.width, viewport.height) {
        redraw |= controls.handle(ViewerEvent::Resize {
            width: viewport.width,
            height: viewport.height,
        });
    }
    for event in viewer_events(events) {
        redraw |= controls.handle(event);
    }
    redraw |= controls.tick(config);
    redraw
}

/// Point the camera the way the view matrix does, with the same field of
/// view.
pub fn sync_camera(camera: &mut Camera, xf: &Transformations) {
    let (pos, target, up) = xf.eye();
    camera.set_view(to_vec3(pos), to_vec3(target), to_vec3(up));
    camera.set_perspective_projection(degrees(xf.fov()), Z_NEAR, Z_FAR);
}

pub fn camera(window: &Window, xf: &Transformations) -> Camera {
    let mut camera = Camera::new_perspective(
        window.viewport(),
        vec3(0.0, 0.0, 3.0),
        vec3(0.0, 0.0, 0.0),
        vec3(0.0, 1.0, 0.0),
        degrees(xf.fov()),
        Z_NEAR,
        Z_FAR,
    );
    sync_camera(&mut camera, xf);
    camera
}
