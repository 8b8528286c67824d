/*!
Tessellation of a function `z = f(x, y)` into triangles, for graphing.

The graph is rendered y-up: the function arguments are the `x` and `z`
coordinates of the floor plane, and the function value becomes the `y`
coordinate of the vertex.
*/

use std::fmt::Display;

use glam::{Vec4, vec2, vec3};

use crate::{error::Error, mesh::IndexedMesh, vertex::Vertex};

/// Number of subdivisions of each axis of the domain.
pub const DEFAULT_NUM_CELLS: usize = 100;

/// Color of the floor mesh.
pub const FLOOR_COLOR: Vec4 = Vec4::new(0.5, 0.5, 0.0, 1.0);

/// Color of the function mesh.
pub const FUNCTION_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

/// One cell of the floor grid, in floor plane coordinates `(x, z)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Square {
    pub top_left: [f32; 2],
    pub btm_right: [f32; 2],
}

impl Square {
    /// Corners of the two triangles covering this square, in floor plane
    /// coordinates.
    ///
    /// ```text
    ///    top_left ----- (br.x, tl.z)
    ///       |   \   2      |
    ///       |    \         |
    ///       |  1  \        |
    ///  (tl.x, br.z) ---- btm_right
    /// ```
    pub fn triangle_corners(&self) -> [[f32; 2]; 6] {
        let [tx, tz] = self.top_left;
        let [bx, bz] = self.btm_right;
        [
            // First triangle.
            [tx, tz],
            [tx, bz],
            [bx, tz],
            // Second triangle.
            [bx, bz],
            [bx, tz],
            [tx, bz],
        ]
    }
}

/// Rectangular region of the floor plane the function is graphed over.
#[derive(Debug, Copy, Clone, PartialEq, serde::Deserialize)]
pub struct GraphDomain {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Default for GraphDomain {
    fn default() -> Self {
        GraphDomain {
            min: [0.0, 0.0],
            max: [1.0, 1.0],
        }
    }
}

impl GraphDomain {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Result<Self, Error> {
        let domain = GraphDomain { min, max };
        domain.validate()?;
        Ok(domain)
    }

    pub fn validate(&self) -> Result<(), Error> {
        // Written to also reject NaN bounds.
        if !(self.min[0] < self.max[0] && self.min[1] < self.max[1]) {
            return Err(Error::InvalidDomain {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Width of a cell along each axis when the domain is divided into
    /// `num_cells` cells per axis.
    pub fn cell_size(&self, num_cells: usize) -> [f64; 2] {
        [
            (self.max[0] - self.min[0]) / num_cells as f64,
            (self.max[1] - self.min[1]) / num_cells as f64,
        ]
    }
}

/// Some useful information about a generated mesh, for debugging.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshSummary {
    pub num_cells: usize,
    pub num_triangles: usize,
    pub num_vertices: usize,
    /// Smallest and largest finite function value. `None` if there are none.
    pub height_range: Option<(f32, f32)>,
    pub non_finite: usize,
}

impl Display for MeshSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Number of triangles: {}", self.num_triangles)?;
        write!(
            f,
            "\nNumber of cells: {} x {}",
            self.num_cells, self.num_cells
        )?;
        write!(f, "\nNumber of vertices: {}", self.num_vertices)?;
        match self.height_range {
            Some((lo, hi)) => write!(f, "\nHeight range: [{}, {}]", lo, hi)?,
            None => write!(f, "\nHeight range: none")?,
        }
        if self.non_finite > 0 {
            write!(f, "\nNon-finite values: {}", self.non_finite)?;
        }
        Ok(())
    }
}

/// Builds a mesh for graphing a function `z = f(x, y)`.
///
/// The domain is divided into a grid of square cells, each cell is covered by
/// two triangles lying on the floor plane, and the function mesh is the floor
/// mesh with each vertex lifted to the value of the function.
pub struct FunctionMesh<F>
where
    F: Fn(f64, f64) -> f64,
{
    func: F,
    num_cells: usize,
    domain: GraphDomain,
    squares: Vec<Square>,
    floor_vertices: Vec<Vertex>,
    function_vertices: Vec<Vertex>,
}

impl<F> FunctionMesh<F>
where
    F: Fn(f64, f64) -> f64,
{
    /// Tessellate `func` over the unit square with `DEFAULT_NUM_CELLS` cells
    /// per axis.
    pub fn new(func: F) -> Self {
        let mut mesh = FunctionMesh {
            func,
            num_cells: DEFAULT_NUM_CELLS,
            domain: GraphDomain::default(),
            squares: Vec::new(),
            floor_vertices: Vec::new(),
            function_vertices: Vec::new(),
        };
        mesh.generate_mesh();
        mesh
    }

    pub fn with_options(func: F, num_cells: usize, domain: GraphDomain) -> Result<Self, Error> {
        if num_cells == 0 {
            return Err(Error::InvalidCellCount(num_cells));
        }
        domain.validate()?;
        let mut mesh = FunctionMesh {
            func,
            num_cells,
            domain,
            squares: Vec::new(),
            floor_vertices: Vec::new(),
            function_vertices: Vec::new(),
        };
        mesh.generate_mesh();
        Ok(mesh)
    }

    /// Rebuild the floor squares, the floor vertices and the function
    /// vertices.
    pub fn generate_mesh(&mut self) {
        self.build_floor_squares();
        self.compute_floor_vertices();
        self.compute_function_vertices();
        log::debug!("{}", self.summary());
    }

    fn build_floor_squares(&mut self) {
        let n = self.num_cells;
        let [wx, wz] = self.domain.cell_size(n);
        let [x0, z0] = self.domain.min;
        self.squares.clear();
        self.squares.reserve(n * n);
        for i in 1..=n {
            for j in 1..=n {
                self.squares.push(Square {
                    top_left: [
                        (x0 + (i - 1) as f64 * wx) as f32,
                        (z0 + (j - 1) as f64 * wz) as f32,
                    ],
                    btm_right: [(x0 + i as f64 * wx) as f32, (z0 + j as f64 * wz) as f32],
                });
            }
        }
    }

    fn compute_floor_vertices(&mut self) {
        self.floor_vertices.clear();
        self.floor_vertices.reserve(self.squares.len() * 6);
        self.floor_vertices.extend(
            self.squares
                .iter()
                .flat_map(|sq| sq.triangle_corners())
                .map(|[x, z]| Vertex::at(vec3(x, 0.0, z))),
        );
    }

    fn compute_function_vertices(&mut self) {
        let func = &self.func;
        self.function_vertices.clear();
        self.function_vertices.reserve(self.floor_vertices.len());
        self.function_vertices
            .extend(self.floor_vertices.iter().map(|v| {
                let (x, z) = (v.position.x, v.position.z);
                let y = func(x as f64, z as f64) as f32;
                Vertex::at(vec3(x, y, z))
            }));
        let non_finite = self
            .function_vertices
            .iter()
            .filter(|v| !v.position.y.is_finite())
            .count();
        if non_finite > 0 {
            log::warn!(
                "Function produced {} non-finite values over the graph domain",
                non_finite
            );
        }
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    pub fn domain(&self) -> &GraphDomain {
        &self.domain
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn num_triangles(&self) -> usize {
        self.squares.len() * 2
    }

    pub fn floor_vertices(&self) -> &[Vertex] {
        &self.floor_vertices
    }

    pub fn function_vertices(&self) -> &[Vertex] {
        &self.function_vertices
    }

    /// Floor vertices as groups of `x, y, z, u, v`.
    pub fn floor_interleaved(&self) -> Vec<f32> {
        Vertex::to_interleaved(&self.floor_vertices)
    }

    /// Function vertices as groups of `x, y, z, u, v`.
    pub fn function_interleaved(&self) -> Vec<f32> {
        Vertex::to_interleaved(&self.function_vertices)
    }

    pub fn floor_mesh(&self) -> IndexedMesh {
        // The vertex count is always a multiple of 6.
        IndexedMesh::from_triangle_soup(self.floor_vertices.clone()).unwrap_or_default()
    }

    pub fn function_mesh(&self) -> IndexedMesh {
        IndexedMesh::from_triangle_soup(self.function_vertices.clone()).unwrap_or_default()
    }

    /// The function mesh as a grid of shared vertices, with `(n + 1)^2`
    /// vertices and `2 n^2` triangles wound the same way as the triangle
    /// soup. Texture coordinates span `[0, 1]` across the domain.
    pub fn indexed_function_mesh(&self) -> Result<IndexedMesh, Error> {
        let n = self.num_cells;
        let [wx, wz] = self.domain.cell_size(n);
        let [x0, z0] = self.domain.min;
        let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
        for i in 0..=n {
            for j in 0..=n {
                let x = x0 + i as f64 * wx;
                let z = z0 + j as f64 * wz;
                let y = (self.func)(x, z);
                vertices.push(Vertex::new(
                    vec3(x as f32, y as f32, z as f32),
                    vec2(i as f32 / n as f32, j as f32 / n as f32),
                ));
            }
        }
        let index = |i: usize, j: usize| (i * (n + 1) + j) as u32;
        let mut indices = Vec::with_capacity(n * n * 6);
        for i in 0..n {
            for j in 0..n {
                let (tl, bl, tr, br) = (
                    index(i, j),
                    index(i, j + 1),
                    index(i + 1, j),
                    index(i + 1, j + 1),
                );
                indices.extend_from_slice(&[tl, bl, tr, br, tr, bl]);
            }
        }
        IndexedMesh::new(vertices, indices, Vec::new())
    }

    pub fn summary(&self) -> MeshSummary {
        let mut non_finite = 0usize;
        let height_range = self
            .function_vertices
            .iter()
            .map(|v| v.position.y)
            .filter(|y| {
                let finite = y.is_finite();
                if !finite {
                    non_finite += 1;
                }
                finite
            })
            .fold(None, |range: Option<(f32, f32)>, y| match range {
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
                None => Some((y, y)),
            });
        MeshSummary {
            num_cells: self.num_cells,
            num_triangles: self.num_triangles(),
            num_vertices: self.function_vertices.len(),
            height_range,
            non_finite,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{DEFAULT_NUM_CELLS, FunctionMesh, GraphDomain, Square};
    use crate::{error::Error, macros::assert_f32_eq};

    fn paraboloid(x: f64, y: f64) -> f64 {
        x * x + y * y
    }

    #[test]
    fn t_default_grid() {
        let mesh = FunctionMesh::new(paraboloid);
        assert_eq!(mesh.num_cells(), DEFAULT_NUM_CELLS);
        assert_eq!(mesh.squares().len(), 100 * 100);
        assert_eq!(mesh.num_triangles(), 20000);
        assert_eq!(mesh.floor_vertices().len(), 60000);
        assert_eq!(mesh.function_vertices().len(), 60000);
        assert_eq!(mesh.floor_interleaved().len(), 300000);
    }

    #[test]
    fn t_square_order() {
        let mesh = FunctionMesh::with_options(paraboloid, 2, GraphDomain::default())
            .expect("Cannot create mesh");
        assert_eq!(
            mesh.squares(),
            &[
                Square {
                    top_left: [0.0, 0.0],
                    btm_right: [0.5, 0.5]
                },
                Square {
                    top_left: [0.0, 0.5],
                    btm_right: [0.5, 1.0]
                },
                Square {
                    top_left: [0.5, 0.0],
                    btm_right: [1.0, 0.5]
                },
                Square {
                    top_left: [0.5, 0.5],
                    btm_right: [1.0, 1.0]
                },
            ]
        );
    }

    #[test]
    fn t_floor_triangles() {
        let mesh = FunctionMesh::with_options(paraboloid, 1, GraphDomain::default())
            .expect("Cannot create mesh");
        let corners: Vec<_> = mesh
            .floor_vertices()
            .iter()
            .map(|v| [v.position.x, v.position.y, v.position.z])
            .collect();
        assert_eq!(
            corners,
            vec![
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 0.0],
                [1.0, 0.0, 1.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
            ]
        );
        assert!(
            mesh.floor_vertices()
                .iter()
                .all(|v| v.tex_coords == glam::Vec2::ZERO)
        );
    }

    #[test]
    fn t_function_heights() {
        let mesh = FunctionMesh::with_options(paraboloid, 4, GraphDomain::default())
            .expect("Cannot create mesh");
        for (floor, func) in mesh.floor_vertices().iter().zip(mesh.function_vertices()) {
            assert_eq!(floor.position.x, func.position.x);
            assert_eq!(floor.position.z, func.position.z);
            assert_f32_eq!(
                func.position.y,
                paraboloid(floor.position.x as f64, floor.position.z as f64) as f32
            );
        }
        let summary = mesh.summary();
        assert_eq!(summary.height_range, Some((0.0, 2.0)));
        assert!(summary.to_string().starts_with("Number of triangles: 32"));
    }

    #[test]
    fn t_custom_domain() {
        let domain = GraphDomain::new([-1.0, -2.0], [1.0, 2.0]).expect("Invalid domain");
        let mesh = FunctionMesh::with_options(|x, _| x, 4, domain).expect("Cannot create mesh");
        let (lo, hi) = mesh.floor_mesh().bounds().expect("Empty mesh");
        assert_eq!([lo.x, lo.z], [-1.0, -2.0]);
        assert_eq!([hi.x, hi.z], [1.0, 2.0]);
        assert_eq!(mesh.summary().height_range, Some((-1.0, 1.0)));
    }

    #[test]
    fn t_invalid_options() {
        assert!(matches!(
            FunctionMesh::with_options(paraboloid, 0, GraphDomain::default()),
            Err(Error::InvalidCellCount(0))
        ));
        assert!(matches!(
            GraphDomain::new([1.0, 0.0], [0.0, 1.0]),
            Err(Error::InvalidDomain { .. })
        ));
        assert!(GraphDomain::new([0.0, f64::NAN], [1.0, 1.0]).is_err());
    }

    #[test]
    fn t_non_finite_values() {
        let mesh = FunctionMesh::with_options(|x, y| 1.0 / (x + y), 2, GraphDomain::default())
            .expect("Cannot create mesh");
        let summary = mesh.summary();
        // The corner (0, 0) appears once per triangle touching it.
        assert_eq!(summary.non_finite, 1);
        assert_eq!(summary.height_range.map(|(_, hi)| hi), Some(2.0));
    }

    #[test]
    fn t_indexed_function_mesh() {
        let mesh = FunctionMesh::with_options(paraboloid, 3, GraphDomain::default())
            .expect("Cannot create mesh");
        let indexed = mesh.indexed_function_mesh().expect("Cannot index mesh");
        assert_eq!(indexed.num_vertices(), 16);
        assert_eq!(indexed.num_triangles(), 18);
        // Same triangles as the soup, up to vertex sharing.
        let soup = mesh.function_mesh();
        for (a, b) in indexed.triangles().zip(soup.triangles()) {
            for k in 0..3 {
                let pa = indexed.vertices()[a[k] as usize].position;
                let pb = soup.vertices()[b[k] as usize].position;
                assert!((pa - pb).length() < 1e-6, "{:?} != {:?}", pa, pb);
            }
        }
        // The paraboloid opens upwards.
        assert!(indexed.vertex_normals().iter().all(|n| n.y > 0.0));
    }
}
