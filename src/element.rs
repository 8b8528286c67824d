use std::fmt::{Debug, Display};

/**
 * Everything a flattened model hands out references to is identified by its
 * index.
 */
pub trait Handle {
    /**
     * The index of the element.
     */
    fn index(&self) -> u32;
}

macro_rules! impl_handle {
    ($name:ident, $label:literal) => {
        impl Handle for $name {
            fn index(&self) -> u32 {
                self.idx
            }
        }

        impl From<u32> for $name {
            fn from(idx: u32) -> Self {
                $name { idx }
            }
        }

        impl From<&u32> for $name {
            fn from(idx: &u32) -> Self {
                $name { idx: *idx }
            }
        }

        impl From<usize> for $name {
            fn from(idx: usize) -> Self {
                $name { idx: idx as u32 }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", $label, self.idx)
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", $label, self.idx)
            }
        }
    };
}

/**
 * Mesh handle. Indexes the meshes of a scene, or of a flattened model.
 */
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeshH {
    idx: u32,
}

/**
 * Texture handle. Indexes the deduplicated texture table of a model.
 */
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TexH {
    idx: u32,
}

/**
 * Node handle. Nodes are numbered in depth-first order, root first.
 */
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeH {
    idx: u32,
}

impl_handle!(MeshH, "MeshH");
impl_handle!(TexH, "TexH");
impl_handle!(NodeH, "NodeH");

impl MeshH {
    /// Check if this mesh exists in a collection of `len` meshes.
    pub fn is_valid(self, len: usize) -> bool {
        (self.idx as usize) < len
    }
}

impl TexH {
    /// Check if this texture exists in a table of `len` textures.
    pub fn is_valid(self, len: usize) -> bool {
        (self.idx as usize) < len
    }
}
