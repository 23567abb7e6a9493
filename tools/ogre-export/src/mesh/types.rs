//! Types and constants for submesh conversion

use smallvec::SmallVec;

use crate::source::Uv;

/// Per-component tolerance when comparing UVs of two corners
pub const UV_EPSILON: f64 = 1e-7;

/// Maximum vertices per submesh (16-bit indices, `use32bitindexes="false"`)
pub const MAX_SUBMESH_VERTICES: usize = u16::MAX as usize + 1;

/// UV pairs of one corner, one per channel
pub type UvSet = SmallVec<[Uv; 2]>;

/// Three output vertex indices in source winding order
pub type Triangle = [u32; 3];

/// De-duplicated vertex of a submesh's vertex buffer
#[derive(Debug, Clone, PartialEq)]
pub struct OutputVertex {
    /// Source vertex supplying position and normal
    pub source: u32,
    /// One UV pair per channel
    pub uvs: UvSet,
}

/// Triangles of one material within one object, with their own vertex buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Submesh {
    /// Index of the owning object in the assembled object list
    pub object: usize,
    /// Material slot the faces were grouped by
    pub material_index: u32,
    /// Material name, only when the source declares materials
    pub material: Option<String>,
    pub triangles: Vec<Triangle>,
    /// Buffer order: `vertices[i]` is output vertex `i`
    pub vertices: Vec<OutputVertex>,
}

/// Entry of the submesh name table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmeshName {
    pub name: String,
    pub index: u32,
}

/// Submeshes of every exported object, flattened in emission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshDocument {
    pub submeshes: Vec<Submesh>,
    /// `names[i]` names `submeshes[i]`, with `index == i`
    pub names: Vec<SubmeshName>,
}

impl MeshDocument {
    pub fn vertex_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.vertices.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.triangles.len()).sum()
    }
}
