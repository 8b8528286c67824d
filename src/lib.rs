/*!
Geometry and scene plumbing for a handful of small OpenGL style viewers.

Nothing in this crate talks to a GPU. It produces vertex and index buffers,
textures and matrices, and leaves drawing them to the caller.

# Overview

+ [`FunctionMesh`] tessellates a function `z = f(x, y)` over a rectangular
  domain into a floor mesh and a function mesh, for graphing.

+ [`Scene`] is the node / mesh / material tree produced by importing a model
  file. OBJ files are imported with [`tobj`](https://crates.io/crates/tobj)
  when the `obj` feature is enabled.

+ [`Model`] flattens a [`Scene`] into draw-ready [`IndexedMesh`]es with a
  deduplicated table of textures. Textures are loaded through the
  [`TextureLoader`] trait. The `textures` feature provides [`ImageLoader`],
  which decodes files with the [`image`](https://crates.io/crates/image)
  crate.

+ [`Transformations`] holds the projection, view and model matrices of a
  viewer, and [`Controls`] updates them from [`ViewerEvent`]s such as mouse
  drags and scrolling.

+ [`primitive`] has the hardcoded geometry of the demos: a textured cube, a
  floor plane and the two triangles of the hello triangle demo.

+ [`ViewerConfig`] is the TOML configuration shared by the viewers.

All the geometric types come from [`glam`](https://crates.io/crates/glam).
*/

mod config;
mod controls;
mod element;
mod error;
mod function_mesh;
mod macros;
mod mesh;
mod model;
pub mod primitive;
mod scene;
mod texture;
mod transform;
mod vertex;

pub use config::{GrapherConfig, ViewerConfig, WindowConfig};
pub use controls::{Controls, DRAG_SENSITIVITY, ViewerEvent};
pub use element::{Handle, MeshH, NodeH, TexH};
pub use error::Error;
pub use function_mesh::{
    DEFAULT_NUM_CELLS, FLOOR_COLOR, FUNCTION_COLOR, FunctionMesh, GraphDomain, MeshSummary,
    Square,
};
pub use mesh::IndexedMesh;
pub use model::{LoadedTexture, Model, ModelStats};
pub use scene::{ImportOptions, Scene, SceneMaterial, SceneMesh, SceneNode};
#[cfg(feature = "textures")]
pub use texture::ImageLoader;
pub use texture::{
    PixelFormat, TextureImage, TextureKind, TextureLoader, sampler_uniform_names, texture_path,
};
pub use transform::{Transformations, UniformSink, aspect_ratio};
pub use vertex::{FLOATS_PER_VERTEX, Vertex, vertex_count};

/// Constants of the viewer transformations.
pub mod consts {
    pub use crate::transform::{
        CAMERA_POSITION, FOV_DEFAULT, FOV_MAX, FOV_MIN, MODEL_ANGLE, MODEL_SCALE,
        ROTATION_INCREMENT, ROTATION_STEPS, Z_FAR, Z_NEAR,
    };
}
