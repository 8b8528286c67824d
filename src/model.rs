use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use glam::{Mat4, Vec2, Vec3};

use crate::{
    element::{Handle, MeshH, TexH},
    error::Error,
    mesh::IndexedMesh,
    scene::{Scene, SceneMaterial, SceneMesh},
    texture::{TextureImage, TextureKind, TextureLoader, texture_path},
    vertex::Vertex,
};

/// A texture loaded for a model.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTexture {
    pub kind: TextureKind,
    /// The path as written in the material.
    pub path: String,
    pub image: TextureImage,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ModelStats {
    pub meshes: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub textures: usize,
}

/// A model flattened into draw-ready meshes.
///
/// The meshes are stored in depth first order of the scene nodes that
/// reference them. A mesh referenced by several nodes appears once per node.
/// Textures are shared between meshes: each texture file is loaded once and
/// the meshes refer to it by handle.
#[derive(Debug, Clone, Default)]
pub struct Model {
    meshes: Vec<IndexedMesh>,
    transforms: Vec<Mat4>,
    textures: Vec<LoadedTexture>,
    texture_cache: HashMap<String, TexH>,
    directory: PathBuf,
}

impl Model {
    /// Flatten the `scene`. Textures are resolved relative to `directory`.
    pub fn from_scene(
        scene: &Scene,
        directory: &Path,
        loader: &mut impl TextureLoader,
    ) -> Result<Self, Error> {
        let root = scene.validate()?;
        let mut model = Model {
            directory: directory.to_path_buf(),
            ..Default::default()
        };
        let mut placements = Vec::new();
        root.walk(Mat4::IDENTITY, &mut |node, _, world, _| {
            placements.extend(node.meshes.iter().map(|&mi| (mi, world)));
        });
        model.meshes.reserve(placements.len());
        for (mi, world) in placements {
            let mesh = &scene.meshes[mi];
            let material = mesh.material.map(|m| &scene.materials[m]);
            let flat = model.process_mesh(mesh, material, loader)?;
            model.meshes.push(flat);
            model.transforms.push(world);
        }
        log::debug!("{:?}", model.stats());
        Ok(model)
    }

    fn process_mesh(
        &mut self,
        mesh: &SceneMesh,
        material: Option<&SceneMaterial>,
        loader: &mut impl TextureLoader,
    ) -> Result<IndexedMesh, Error> {
        let vertices: Vec<Vertex> = mesh
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                // Only the first set of texture coordinates is used.
                let uv = mesh.tex_coords.get(i).copied().unwrap_or(Vec2::ZERO);
                Vertex::new(*p, uv)
            })
            .collect();
        let mut indices = Vec::with_capacity(mesh.faces.len() * 3);
        for face in &mesh.faces {
            match face.len() {
                0..=2 => log::debug!(
                    "Skipping degenerate face with {} indices in mesh '{}'",
                    face.len(),
                    mesh.name
                ),
                3 => indices.extend_from_slice(face),
                _ => {
                    for k in 1..(face.len() - 1) {
                        indices.extend_from_slice(&[face[0], face[k], face[k + 1]]);
                    }
                }
            }
        }
        let textures = match material {
            Some(mat) => self.load_textures(mat, TextureKind::Diffuse, loader)?,
            None => Vec::new(),
        };
        IndexedMesh::new(vertices, indices, textures)
    }

    fn load_textures(
        &mut self,
        material: &SceneMaterial,
        kind: TextureKind,
        loader: &mut impl TextureLoader,
    ) -> Result<Vec<TexH>, Error> {
        let mut handles = Vec::new();
        for path in material.textures_of(kind) {
            if let Some(&handle) = self.texture_cache.get(path) {
                handles.push(handle);
                continue;
            }
            let image = loader.load(&texture_path(&self.directory, path))?;
            let handle = TexH::from(self.textures.len());
            self.textures.push(LoadedTexture {
                kind,
                path: path.to_string(),
                image,
            });
            self.texture_cache.insert(path.to_string(), handle);
            handles.push(handle);
        }
        Ok(handles)
    }

    pub fn meshes(&self) -> &[IndexedMesh] {
        &self.meshes
    }

    /// World transformation of the node the mesh was found in.
    pub fn mesh_transform(&self, mesh: MeshH) -> Option<Mat4> {
        self.transforms.get(mesh.index() as usize).copied()
    }

    pub fn textures(&self) -> &[LoadedTexture] {
        &self.textures
    }

    pub fn texture(&self, tex: TexH) -> Result<&LoadedTexture, Error> {
        self.textures
            .get(tex.index() as usize)
            .ok_or(Error::TextureNotFound(tex))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            meshes: self.meshes.len(),
            vertices: self.meshes.iter().map(|m| m.num_vertices()).sum(),
            triangles: self.meshes.iter().map(|m| m.num_triangles()).sum(),
            textures: self.textures.len(),
        }
    }

    /// Bounding box of all meshes in world space.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.meshes
            .iter()
            .zip(&self.transforms)
            .filter_map(|(mesh, xform)| {
                let (lo, hi) = mesh.bounds()?;
                // Transform all 8 corners, the box may be rotated.
                let corners = (0..8).map(|i| {
                    xform.transform_point3(Vec3::new(
                        if i & 1 == 0 { lo.x } else { hi.x },
                        if i & 2 == 0 { lo.y } else { hi.y },
                        if i & 4 == 0 { lo.z } else { hi.z },
                    ))
                });
                corners.fold(None, |acc: Option<(Vec3, Vec3)>, p| match acc {
                    Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
                    None => Some((p, p)),
                })
            })
            .reduce(|(alo, ahi), (blo, bhi)| (alo.min(blo), ahi.max(bhi)))
    }
}

#[cfg(feature = "obj")]
impl Model {
    /// Import the OBJ file at `path` and flatten it. Textures are loaded from
    /// the `textures` directory next to the file.
    pub fn load(path: &Path, loader: &mut impl TextureLoader) -> Result<Self, Error> {
        let scene = Scene::load_obj(path, crate::scene::ImportOptions::default())?;
        log::info!(
            "Loaded scene '{}' with {} meshes and {} nodes",
            path.display(),
            scene.num_meshes(),
            scene.num_nodes()
        );
        let directory = path.parent().unwrap_or_else(|| Path::new("."));
        Model::from_scene(&scene, directory, loader)
    }
}
