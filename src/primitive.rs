/*!
Hardcoded geometry used by the demos: the textured cube, the floor plane, the
two triangles of the hello-triangle demo, and the cube layout of the
coordinate systems demo.

Textured geometry is stored interleaved as `x, y, z, u, v`.
*/

use glam::{Mat4, Vec3, Vec4, vec3};

use crate::{mesh::IndexedMesh, vertex::Vertex};

/// Unit cube centered at the origin. 6 faces, 2 triangles per face.
#[rustfmt::skip]
pub const CUBE: [f32; 180] = [
    // Back (-z).
    -0.5, -0.5, -0.5, 0.0, 0.0,   0.5, -0.5, -0.5, 1.0, 0.0,   0.5,  0.5, -0.5, 1.0, 1.0,
     0.5,  0.5, -0.5, 1.0, 1.0,  -0.5,  0.5, -0.5, 0.0, 1.0,  -0.5, -0.5, -0.5, 0.0, 0.0,
    // Front (+z).
    -0.5, -0.5,  0.5, 0.0, 0.0,   0.5, -0.5,  0.5, 1.0, 0.0,   0.5,  0.5,  0.5, 1.0, 1.0,
     0.5,  0.5,  0.5, 1.0, 1.0,  -0.5,  0.5,  0.5, 0.0, 1.0,  -0.5, -0.5,  0.5, 0.0, 0.0,
    // Left (-x).
    -0.5,  0.5,  0.5, 1.0, 0.0,  -0.5,  0.5, -0.5, 1.0, 1.0,  -0.5, -0.5, -0.5, 0.0, 1.0,
    -0.5, -0.5, -0.5, 0.0, 1.0,  -0.5, -0.5,  0.5, 0.0, 0.0,  -0.5,  0.5,  0.5, 1.0, 0.0,
    // Right (+x).
     0.5,  0.5,  0.5, 1.0, 0.0,   0.5,  0.5, -0.5, 1.0, 1.0,   0.5, -0.5, -0.5, 0.0, 1.0,
     0.5, -0.5, -0.5, 0.0, 1.0,   0.5, -0.5,  0.5, 0.0, 0.0,   0.5,  0.5,  0.5, 1.0, 0.0,
    // Bottom (-y).
    -0.5, -0.5, -0.5, 0.0, 1.0,   0.5, -0.5, -0.5, 1.0, 1.0,   0.5, -0.5,  0.5, 1.0, 0.0,
     0.5, -0.5,  0.5, 1.0, 0.0,  -0.5, -0.5,  0.5, 0.0, 0.0,  -0.5, -0.5, -0.5, 0.0, 1.0,
    // Top (+y).
    -0.5,  0.5, -0.5, 0.0, 1.0,   0.5,  0.5, -0.5, 1.0, 1.0,   0.5,  0.5,  0.5, 1.0, 0.0,
     0.5,  0.5,  0.5, 1.0, 0.0,  -0.5,  0.5,  0.5, 0.0, 0.0,  -0.5,  0.5, -0.5, 0.0, 1.0,
];

/// Floor plane spanning 10 x 10 units, 3 units below the origin.
#[rustfmt::skip]
pub const PLANE: [f32; 30] = [
    -5.0, -3.0, -5.0, 0.0, 0.0,   5.0, -3.0, -5.0, 1.0, 0.0,  -5.0, -3.0,  5.0, 0.0, 1.0,
     5.0, -3.0,  5.0, 1.0, 1.0,   5.0, -3.0, -5.0, 1.0, 0.0,  -5.0, -3.0,  5.0, 0.0, 1.0,
];

/// Positions of the hello-triangle demo, in normalized device coordinates.
#[rustfmt::skip]
pub const HELLO_VERTICES: [f32; 18] = [
     0.55,  0.5, 0.0, // top right
     0.55, -0.5, 0.0, // bottom right
    -0.45, -0.5, 0.0, // bottom left
    -0.55,  0.5, 0.0, // top left
    -0.55, -0.5, 0.0, // bottom left
     0.45,  0.5, 0.0, // top right
];

/// The two triangles of the hello-triangle demo, drawn in separate colors.
pub const HELLO_INDICES: [u32; 6] = [0, 1, 2, 3, 5, 4];

/// Fragment colors of the two hello triangles.
pub const HELLO_COLORS: [Vec4; 2] = [
    Vec4::new(1.0, 0.5, 0.2, 1.0),
    Vec4::new(0.0, 0.8, 0.2, 1.0),
];

/// World space positions of the cubes in the coordinate systems demo.
pub const CUBE_POSITIONS: [Vec3; 10] = [
    vec3(0.0, 0.0, 0.0),
    vec3(2.0, 5.0, -15.0),
    vec3(-1.5, -2.2, -2.5),
    vec3(-3.8, -2.0, -12.3),
    vec3(2.4, -0.4, -3.5),
    vec3(-1.7, 3.0, -7.5),
    vec3(1.3, -2.0, -2.5),
    vec3(1.5, 2.0, -2.5),
    vec3(1.5, 0.2, -1.5),
    vec3(-1.3, 1.0, -1.5),
];

/// Axis the coordinate system cubes are rotated around.
pub const CUBE_ROTATION_AXIS: Vec3 = vec3(1.0, 0.3, 0.5);

fn interleaved_vertices(data: &[f32]) -> Vec<Vertex> {
    // The tables above are always whole vertices.
    data.chunks_exact(crate::vertex::FLOATS_PER_VERTEX)
        .map(|c| Vertex::new(vec3(c[0], c[1], c[2]), glam::vec2(c[3], c[4])))
        .collect()
}

pub fn cube_vertices() -> Vec<Vertex> {
    interleaved_vertices(&CUBE)
}

pub fn plane_vertices() -> Vec<Vertex> {
    interleaved_vertices(&PLANE)
}

pub fn cube_mesh() -> IndexedMesh {
    IndexedMesh::new(cube_vertices(), (0..36).collect(), Vec::new())
        .unwrap_or_default()
}

pub fn plane_mesh() -> IndexedMesh {
    IndexedMesh::new(plane_vertices(), (0..6).collect(), Vec::new())
        .unwrap_or_default()
}

/// Hello-triangle geometry. The first triangle uses `HELLO_COLORS[0]`, the
/// second `HELLO_COLORS[1]`.
pub fn hello_mesh() -> IndexedMesh {
    let vertices = HELLO_VERTICES
        .chunks_exact(3)
        .map(|c| Vertex::at(vec3(c[0], c[1], c[2])))
        .collect();
    IndexedMesh::new(vertices, HELLO_INDICES.to_vec(), Vec::new()).unwrap_or_default()
}

/// Model matrix of cube `i` in the coordinate systems demo: translated to
/// `CUBE_POSITIONS[i]` and rotated `20 * i` degrees around
/// `CUBE_ROTATION_AXIS`.
///
/// Returns `None` if `i` is out of range.
pub fn cube_model_matrix(i: usize) -> Option<Mat4> {
    let position = CUBE_POSITIONS.get(i)?;
    let angle = (20.0 * i as f32).to_radians();
    Some(
        Mat4::from_translation(*position)
            * Mat4::from_axis_angle(CUBE_ROTATION_AXIS.normalize(), angle),
    )
}
