use std::path::PathBuf;

use crate::element::{MeshH, NodeH, TexH};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Vertex data.
    #[error("Expected a multiple of 5 floats per vertex buffer, found {0}")]
    IncorrectNumberOfCoordinates(usize),
    #[error("Expected a multiple of 3 indices, found {0}")]
    IncorrectIndexCount(usize),
    #[error("Expected a multiple of 3 vertices in a triangle soup, found {0}")]
    IncorrectVertexCount(usize),
    #[error("Index {index} is out of bounds for {len} elements")]
    IndexOutOfBounds { index: usize, len: usize },
    // Function mesh.
    #[error("Cell count must be at least 1, found {0}")]
    InvalidCellCount(usize),
    #[error("Graph domain min {min:?} must be less than max {max:?}")]
    InvalidDomain { min: [f64; 2], max: [f64; 2] },
    // Scene import.
    #[error("Invalid obj file: {0}")]
    InvalidObjFile(PathBuf),
    #[error("Failed to load obj: {0}")]
    ObjLoadFailed(String),
    /// The importer produced a scene without a root node, or flagged it as
    /// incomplete.
    #[error("Scene is incomplete")]
    IncompleteScene,
    #[error("Node {0} refers to a mesh that does not exist")]
    DanglingMesh(NodeH),
    #[error("Mesh {0} refers to a material that does not exist")]
    DanglingMaterial(MeshH),
    // Textures.
    #[error("Texture failed to load at path {0}: {1}")]
    TextureLoadFailed(PathBuf, String),
    #[error("Unsupported texture channel count: {0}")]
    UnsupportedChannelCount(u8),
    #[error("Texture {0} does not exist")]
    TextureNotFound(TexH),
    // Other.
    #[error("Array lengths do not match: {0} != {1}")]
    MismatchedArrayLengths(usize, usize),
    // Config.
    #[error("Cannot parse config: {0}")]
    ConfigParse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
