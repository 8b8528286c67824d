use glam::{Vec2, Vec3, vec2, vec3};

use crate::error::Error;

/// Number of floats per vertex in the interleaved layout: `x, y, z, u, v`.
pub const FLOATS_PER_VERTEX: usize = 5;

/// A vertex with a position and one set of texture coordinates.
///
/// The layout is `#[repr(C)]` so a slice of vertices can be handed to a
/// vertex buffer as-is, with the position at offset 0 and the texture
/// coordinates at offset 12.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[repr(C)]
pub struct Vertex {
    pub position: Vec3,
    pub tex_coords: Vec2,
}

impl Vertex {
    pub const fn new(position: Vec3, tex_coords: Vec2) -> Self {
        Vertex {
            position,
            tex_coords,
        }
    }

    /// Vertex at the given position with zero texture coordinates.
    pub const fn at(position: Vec3) -> Self {
        Vertex {
            position,
            tex_coords: Vec2::ZERO,
        }
    }

    /// Read vertices from a buffer laid out as groups of `x, y, z, u, v`.
    pub fn from_interleaved(data: &[f32]) -> Result<Vec<Vertex>, Error> {
        if data.len() % FLOATS_PER_VERTEX != 0 {
            return Err(Error::IncorrectNumberOfCoordinates(data.len()));
        }
        Ok(data
            .chunks_exact(FLOATS_PER_VERTEX)
            .map(|c| Vertex::new(vec3(c[0], c[1], c[2]), vec2(c[3], c[4])))
            .collect())
    }

    /// Write vertices as groups of `x, y, z, u, v`.
    pub fn to_interleaved(vertices: &[Vertex]) -> Vec<f32> {
        let mut out = Vec::with_capacity(vertices.len() * FLOATS_PER_VERTEX);
        for v in vertices {
            out.extend_from_slice(&[
                v.position.x,
                v.position.y,
                v.position.z,
                v.tex_coords.x,
                v.tex_coords.y,
            ]);
        }
        out
    }
}

/// Number of whole vertices in an interleaved buffer.
pub fn vertex_count(data: &[f32]) -> usize {
    data.len() / FLOATS_PER_VERTEX
}

#[cfg(test)]
mod test {
    use glam::{vec2, vec3};

    use super::{FLOATS_PER_VERTEX, Vertex, vertex_count};
    use crate::error::Error;

    #[test]
    fn t_vertex_layout() {
        assert_eq!(
            std::mem::size_of::<Vertex>(),
            FLOATS_PER_VERTEX * std::mem::size_of::<f32>()
        );
        assert_eq!(std::mem::offset_of!(Vertex, tex_coords), 12);
    }

    #[test]
    fn t_from_interleaved() {
        let verts =
            Vertex::from_interleaved(&[0.0, 1.0, 2.0, 0.25, 0.75, -1.0, -2.0, -3.0, 1.0, 0.0])
                .expect("Cannot read vertices");
        assert_eq!(
            verts,
            vec![
                Vertex::new(vec3(0.0, 1.0, 2.0), vec2(0.25, 0.75)),
                Vertex::new(vec3(-1.0, -2.0, -3.0), vec2(1.0, 0.0)),
            ]
        );
        assert_eq!(Vertex::to_interleaved(&verts).len(), 10);
    }

    #[test]
    fn t_from_interleaved_rejects_partial_vertex() {
        match Vertex::from_interleaved(&[0.0; 7]) {
            Err(Error::IncorrectNumberOfCoordinates(7)) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn t_vertex_count() {
        assert_eq!(vertex_count(&[0.0; 15]), 3);
        assert_eq!(vertex_count(&[]), 0);
    }
}
