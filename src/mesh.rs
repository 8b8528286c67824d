use glam::{Mat4, Vec3};

use crate::{element::TexH, error::Error, vertex::Vertex};

/// Draw-ready triangle mesh: a vertex buffer, an element buffer and the
/// textures to bind while drawing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    textures: Vec<TexH>,
}

impl IndexedMesh {
    /// Create a mesh from vertices and triangle indices. Every three indices
    /// form a triangle, and every index must refer to an existing vertex.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, textures: Vec<TexH>) -> Result<Self, Error> {
        if indices.len() % 3 != 0 {
            return Err(Error::IncorrectIndexCount(indices.len()));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(Error::IndexOutOfBounds {
                index: bad as usize,
                len: vertices.len(),
            });
        }
        Ok(IndexedMesh {
            vertices,
            indices,
            textures,
        })
    }

    /// Create a mesh from a triangle soup, where every three consecutive
    /// vertices form a triangle.
    pub fn from_triangle_soup(vertices: Vec<Vertex>) -> Result<Self, Error> {
        if vertices.len() % 3 != 0 {
            return Err(Error::IncorrectVertexCount(vertices.len()));
        }
        let indices = (0..vertices.len() as u32).collect();
        Ok(IndexedMesh {
            vertices,
            indices,
            textures: Vec::new(),
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn textures(&self) -> &[TexH] {
        &self.textures
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + use<'_> {
        self.vertices.iter().map(|v| v.position)
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + use<'_> {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// The axis aligned bounding box of the vertices, as `(min, max)`.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self.positions();
        let first = positions.next()?;
        Some(positions.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Compute the vertex normals as the area weighted average of the normals
    /// of the incident triangles.
    ///
    /// Vertices that are not part of any triangle with a non-zero area get a
    /// zero normal.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for [a, b, c] in self.triangles() {
            let (pa, pb, pc) = (
                self.vertices[a as usize].position,
                self.vertices[b as usize].position,
                self.vertices[c as usize].position,
            );
            // Cross product length is twice the area, so this is already weighted.
            let n = (pb - pa).cross(pc - pa);
            for i in [a, b, c] {
                normals[i as usize] += n;
            }
        }
        for n in normals.iter_mut() {
            *n = n.normalize_or_zero();
        }
        normals
    }

    /// Copy of this mesh with the positions transformed as points.
    pub fn transformed(&self, mat: &Mat4) -> Self {
        IndexedMesh {
            vertices: self
                .vertices
                .iter()
                .map(|v| Vertex::new(mat.transform_point3(v.position), v.tex_coords))
                .collect(),
            indices: self.indices.clone(),
            textures: self.textures.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use glam::{Mat4, Vec3, vec3};

    use super::IndexedMesh;
    use crate::{
        error::Error,
        macros::{assert_f32_eq, assert_vec3_eq},
        vertex::Vertex,
    };

    fn quad() -> IndexedMesh {
        IndexedMesh::new(
            vec![
                Vertex::at(vec3(0.0, 0.0, 0.0)),
                Vertex::at(vec3(1.0, 0.0, 0.0)),
                Vertex::at(vec3(1.0, 1.0, 0.0)),
                Vertex::at(vec3(0.0, 1.0, 0.0)),
            ],
            vec![0, 1, 2, 0, 2, 3],
            Vec::new(),
        )
        .expect("Cannot create quad")
    }

    #[test]
    fn t_quad() {
        let q = quad();
        assert_eq!(q.num_vertices(), 4);
        assert_eq!(q.num_triangles(), 2);
        assert_eq!(q.triangles().collect::<Vec<_>>(), vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(
            q.bounds(),
            Some((vec3(0.0, 0.0, 0.0), vec3(1.0, 1.0, 0.0)))
        );
    }

    #[test]
    fn t_quad_normals() {
        for n in quad().vertex_normals() {
            assert_vec3_eq!(n, Vec3::Z);
        }
    }

    #[test]
    fn t_rejects_bad_indices() {
        let verts = vec![Vertex::default(); 3];
        assert!(matches!(
            IndexedMesh::new(verts.clone(), vec![0, 1], Vec::new()),
            Err(Error::IncorrectIndexCount(2))
        ));
        assert!(matches!(
            IndexedMesh::new(verts, vec![0, 1, 3], Vec::new()),
            Err(Error::IndexOutOfBounds { index: 3, len: 3 })
        ));
    }

    #[test]
    fn t_triangle_soup() {
        let soup = IndexedMesh::from_triangle_soup(vec![Vertex::default(); 6])
            .expect("Cannot create soup");
        assert_eq!(soup.indices(), &[0, 1, 2, 3, 4, 5]);
        assert!(matches!(
            IndexedMesh::from_triangle_soup(vec![Vertex::default(); 4]),
            Err(Error::IncorrectVertexCount(4))
        ));
    }

    #[test]
    fn t_degenerate_normals_are_zero() {
        let mesh = IndexedMesh::new(vec![Vertex::default(); 3], vec![0, 1, 2], Vec::new())
            .expect("Cannot create mesh");
        assert!(mesh.vertex_normals().iter().all(|n| *n == Vec3::ZERO));
    }

    #[test]
    fn t_transformed() {
        let moved = quad().transformed(&Mat4::from_translation(vec3(0.0, 0.0, 2.0)));
        let (lo, hi) = moved.bounds().expect("Empty mesh");
        assert_f32_eq!(lo.z, 2.0);
        assert_f32_eq!(hi.z, 2.0);
        assert!(IndexedMesh::default().bounds().is_none());
    }
}
