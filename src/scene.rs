/*!
The scene graph produced by importing a model file: a tree of nodes, each
holding a transformation and indices into the scene's meshes, and a list of
materials referenced by the meshes.

This mirrors the shape most importers produce, so the flattening in
[`crate::Model`] does not depend on the file format.
*/

use glam::{Mat4, Vec2, Vec3};

use crate::{
    element::{MeshH, NodeH},
    error::Error,
    texture::TextureKind,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    /// First set of texture coordinates. Empty if the mesh has none.
    pub tex_coords: Vec<Vec2>,
    /// Vertex indices of each face.
    pub faces: Vec<Vec<u32>>,
    pub material: Option<usize>,
}

impl SceneMesh {
    pub fn has_tex_coords(&self) -> bool {
        !self.tex_coords.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMaterial {
    pub name: String,
    /// Texture files referenced by this material, in order.
    pub textures: Vec<(TextureKind, String)>,
}

impl SceneMaterial {
    pub fn texture_count(&self, kind: TextureKind) -> usize {
        self.textures.iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn textures_of(&self, kind: TextureKind) -> impl Iterator<Item = &str> + use<'_> {
        self.textures
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, path)| path.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    /// Transformation relative to the parent node.
    pub transform: Mat4,
    pub meshes: Vec<usize>,
    pub children: Vec<SceneNode>,
}

impl Default for SceneNode {
    fn default() -> Self {
        SceneNode {
            name: String::new(),
            transform: Mat4::IDENTITY,
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl SceneNode {
    pub fn new(name: &str) -> Self {
        SceneNode {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Number of nodes in the tree rooted at this node.
    pub fn count_nodes(&self) -> usize {
        1 + self.children.iter().map(|c| c.count_nodes()).sum::<usize>()
    }

    /// Visit the nodes of this tree depth first, parents before children, with
    /// the depth, the world transformation and the depth first index of each
    /// node.
    pub fn walk<F>(&self, parent: Mat4, visit: &mut F)
    where
        F: FnMut(&SceneNode, usize, Mat4, NodeH),
    {
        let mut counter = 0u32;
        self.walk_impl(parent, 0, &mut counter, visit);
    }

    fn walk_impl<F>(&self, parent: Mat4, depth: usize, counter: &mut u32, visit: &mut F)
    where
        F: FnMut(&SceneNode, usize, Mat4, NodeH),
    {
        let world = parent * self.transform;
        let handle = NodeH::from(*counter);
        *counter += 1;
        visit(self, depth, world, handle);
        for child in &self.children {
            child.walk_impl(world, depth + 1, counter, visit);
        }
    }
}

/// Post processing applied when importing a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Split polygonal faces into triangles.
    pub triangulate: bool,
    /// Flip the `v` texture coordinate, so that `v = 0` is the top of the image.
    pub flip_uvs: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            triangulate: true,
            flip_uvs: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub meshes: Vec<SceneMesh>,
    pub materials: Vec<SceneMaterial>,
    pub root: Option<SceneNode>,
    /// Set by the importer when it could not produce the whole scene.
    pub incomplete: bool,
}

impl Scene {
    /// Check the scene is complete, and that all mesh and material references
    /// are in range.
    pub fn validate(&self) -> Result<&SceneNode, Error> {
        let root = match &self.root {
            Some(root) if !self.incomplete => root,
            _ => return Err(Error::IncompleteScene),
        };
        let mut dangling = None;
        root.walk(Mat4::IDENTITY, &mut |node, _, _, handle| {
            if dangling.is_none() && node.meshes.iter().any(|&m| m >= self.meshes.len()) {
                dangling = Some(handle);
            }
        });
        if let Some(node) = dangling {
            return Err(Error::DanglingMesh(node));
        }
        for (i, mesh) in self.meshes.iter().enumerate() {
            if let Some(mat) = mesh.material {
                if mat >= self.materials.len() {
                    return Err(Error::DanglingMaterial(MeshH::from(i)));
                }
            }
        }
        Ok(root)
    }

    pub fn num_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.count_nodes())
    }
}

#[cfg(feature = "obj")]
mod obj {
    use std::{io::BufRead, path::Path};

    use glam::{vec2, vec3};

    use super::{ImportOptions, Scene, SceneMaterial, SceneMesh, SceneNode};
    use crate::{error::Error, texture::TextureKind};

    fn load_options(options: ImportOptions) -> tobj::LoadOptions {
        tobj::LoadOptions {
            single_index: true,
            triangulate: options.triangulate,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        }
    }

    fn convert_material(mat: &tobj::Material) -> SceneMaterial {
        let mut textures = Vec::new();
        let maps = [
            (TextureKind::Diffuse, &mat.diffuse_texture),
            (TextureKind::Specular, &mat.specular_texture),
            (TextureKind::Normal, &mat.normal_texture),
            // Ambient maps are what OBJ exporters use for height maps.
            (TextureKind::Height, &mat.ambient_texture),
        ];
        for (kind, path) in maps {
            if let Some(path) = path {
                textures.push((kind, path.clone()));
            }
        }
        SceneMaterial {
            name: mat.name.clone(),
            textures,
        }
    }

    fn convert_mesh(model: tobj::Model, options: ImportOptions) -> Result<SceneMesh, Error> {
        let mesh = model.mesh;
        if mesh.positions.len() % 3 != 0 {
            return Err(Error::ObjLoadFailed(format!(
                "Mesh '{}' has {} position coordinates",
                model.name,
                mesh.positions.len()
            )));
        }
        let positions: Vec<_> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| vec3(p[0], p[1], p[2]))
            .collect();
        let tex_coords: Vec<_> = if mesh.texcoords.len() == positions.len() * 2 {
            mesh.texcoords
                .chunks_exact(2)
                .map(|t| {
                    if options.flip_uvs {
                        vec2(t[0], 1.0 - t[1])
                    } else {
                        vec2(t[0], t[1])
                    }
                })
                .collect()
        } else {
            if !mesh.texcoords.is_empty() {
                log::warn!(
                    "Ignoring {} texture coordinates of mesh '{}' with {} vertices",
                    mesh.texcoords.len() / 2,
                    model.name,
                    positions.len()
                );
            }
            Vec::new()
        };
        // Triangulated meshes come without arities.
        let faces: Vec<Vec<u32>> = if mesh.face_arities.is_empty() {
            if mesh.indices.len() % 3 != 0 {
                return Err(Error::IncorrectIndexCount(mesh.indices.len()));
            }
            mesh.indices.chunks_exact(3).map(|f| f.to_vec()).collect()
        } else {
            let mut start = 0usize;
            let mut faces = Vec::with_capacity(mesh.face_arities.len());
            for size in mesh.face_arities {
                let end = start + size as usize;
                let Some(indices) = mesh.indices.get(start..end) else {
                    return Err(Error::IncorrectIndexCount(mesh.indices.len()));
                };
                faces.push(indices.to_vec());
                start = end;
            }
            faces
        };
        Ok(SceneMesh {
            name: model.name,
            positions,
            tex_coords,
            faces,
            material: mesh.material_id,
        })
    }

    fn build_scene(
        name: &str,
        models: Vec<tobj::Model>,
        materials: Result<Vec<tobj::Material>, tobj::LoadError>,
        options: ImportOptions,
    ) -> Result<Scene, Error> {
        let materials = match materials {
            Ok(mats) => mats.iter().map(convert_material).collect(),
            Err(e) => {
                log::warn!("Failed to load materials for '{}': {}", name, e);
                Vec::new()
            }
        };
        // tobj hands out an empty model even for files without faces.
        let models: Vec<_> = models
            .into_iter()
            .filter(|model| {
                let keep = !model.mesh.indices.is_empty();
                if !keep {
                    log::debug!("Skipping model '{}' without faces", model.name);
                }
                keep
            })
            .collect();
        let incomplete = models.is_empty();
        let mut root = SceneNode::new(name);
        let mut meshes = Vec::with_capacity(models.len());
        for model in models {
            let mut child = SceneNode::new(&model.name);
            child.meshes.push(meshes.len());
            let mut mesh = convert_mesh(model, options)?;
            if mesh.material.is_some_and(|m| m >= materials.len()) {
                log::warn!(
                    "Mesh '{}' refers to a missing material, dropping the reference",
                    mesh.name
                );
                mesh.material = None;
            }
            log::debug!(
                "Imported mesh '{}' with {} vertices and {} faces",
                mesh.name,
                mesh.positions.len(),
                mesh.faces.len()
            );
            meshes.push(mesh);
            root.children.push(child);
        }
        Ok(Scene {
            meshes,
            materials,
            root: Some(root),
            incomplete,
        })
    }

    impl Scene {
        /// Import an OBJ file, and its MTL files if it has any.
        ///
        /// The root node is named after the file, with one child node per
        /// object in the file.
        pub fn load_obj(path: &Path, options: ImportOptions) -> Result<Scene, Error> {
            if !path.is_file() {
                return Err(Error::InvalidObjFile(path.to_path_buf()));
            }
            let (models, materials) = tobj::load_obj(path, &load_options(options))
                .map_err(|e| Error::ObjLoadFailed(format!("{}: {}", path.display(), e)))?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            build_scene(&name, models, materials, options)
        }

        /// Import OBJ data from a reader. MTL files referenced by the data are
        /// requested from `material_loader`.
        pub fn load_obj_buf<R, M>(
            name: &str,
            reader: &mut R,
            material_loader: M,
            options: ImportOptions,
        ) -> Result<Scene, Error>
        where
            R: BufRead,
            M: Fn(&Path) -> tobj::MTLLoadResult,
        {
            let (models, materials) =
                tobj::load_obj_buf(reader, &load_options(options), material_loader)
                    .map_err(|e| Error::ObjLoadFailed(format!("{}: {}", name, e)))?;
            build_scene(name, models, materials, options)
        }
    }
}
