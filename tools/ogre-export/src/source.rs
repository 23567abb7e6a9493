//! Geometry sources
//!
//! The converter reads host meshes only through [`GeometrySource`], a
//! read-only view over positions, faces, materials and per-corner UVs.
//! [`SourceMesh`] is the owned implementation produced by the importers.

use smallvec::SmallVec;

/// A single UV pair.
pub type Uv = [f64; 2];

/// Read-only view over one object's mesh.
///
/// Vertex and face indices passed in are expected to be in range; the
/// converter checks face data against [`vertex_count`](Self::vertex_count)
/// before it asks for positions.
pub trait GeometrySource: Sync {
    /// Name of the object that owns this mesh.
    fn object_name(&self) -> &str;

    fn vertex_count(&self) -> usize;

    fn vertex_position(&self, index: u32) -> [f64; 3];

    fn vertex_normal(&self, index: u32) -> [f64; 3];

    /// Whether [`vertex_normal`](Self::vertex_normal) carries real data.
    fn has_normals(&self) -> bool {
        true
    }

    fn face_count(&self) -> usize;

    /// Source vertex indices of a face, in winding order.
    fn face_vertex_indices(&self, face: usize) -> &[u32];

    fn face_material_index(&self, face: usize) -> u32;

    fn uv_channel_count(&self) -> usize;

    /// UV of one face corner, or `None` if the channel has no data there.
    fn face_corner_uv(&self, face: usize, channel: usize, corner: usize) -> Option<Uv>;

    fn material_count(&self) -> usize;

    /// Material name for a slot, or `None` if the slot does not exist.
    fn material_name(&self, index: u32) -> Option<&str>;
}

/// One polygon of a [`SourceMesh`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFace {
    /// Vertex indices in winding order
    pub vertices: SmallVec<[u32; 4]>,
    /// Material slot
    pub material: u32,
    /// Per-corner UVs, indexed `[channel][corner]`
    pub uvs: Vec<SmallVec<[Option<Uv>; 4]>>,
}

/// Owned mesh of one object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMesh {
    pub name: String,
    pub positions: Vec<[f64; 3]>,
    /// Per-vertex normals, if the source provided them
    pub normals: Option<Vec<[f64; 3]>>,
    pub faces: Vec<SourceFace>,
    pub uv_channels: usize,
    pub materials: Vec<String>,
}

impl SourceMesh {
    /// Create an empty mesh for the named object
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_positions(mut self, positions: Vec<[f64; 3]>) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_normals(mut self, normals: Vec<[f64; 3]>) -> Self {
        self.normals = Some(normals);
        self
    }

    pub fn with_uv_channels(mut self, channels: usize) -> Self {
        self.uv_channels = channels;
        self
    }

    pub fn with_materials<I, S>(mut self, materials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.materials = materials.into_iter().map(Into::into).collect();
        self
    }

    /// Append a face with complete UV data (`uvs[channel][corner]`), returning its index
    pub fn push_face(&mut self, vertices: &[u32], material: u32, uvs: &[&[Uv]]) -> usize {
        self.faces.push(SourceFace {
            vertices: SmallVec::from_slice(vertices),
            material,
            uvs: uvs
                .iter()
                .map(|channel| channel.iter().copied().map(Some).collect())
                .collect(),
        });
        self.faces.len() - 1
    }

    /// Find a material slot by name, adding it if missing
    pub fn material_slot(&mut self, name: &str) -> u32 {
        match self.materials.iter().position(|m| m == name) {
            Some(slot) => slot as u32,
            None => {
                self.materials.push(name.to_string());
                (self.materials.len() - 1) as u32
            }
        }
    }
}

impl GeometrySource for SourceMesh {
    fn object_name(&self) -> &str {
        &self.name
    }

    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn vertex_position(&self, index: u32) -> [f64; 3] {
        self.positions[index as usize]
    }

    fn vertex_normal(&self, index: u32) -> [f64; 3] {
        self.normals
            .as_ref()
            .and_then(|n| n.get(index as usize).copied())
            .unwrap_or([0.0, 0.0, 0.0])
    }

    fn has_normals(&self) -> bool {
        self.normals
            .as_ref()
            .is_some_and(|n| n.len() == self.positions.len())
    }

    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face_vertex_indices(&self, face: usize) -> &[u32] {
        &self.faces[face].vertices
    }

    fn face_material_index(&self, face: usize) -> u32 {
        self.faces[face].material
    }

    fn uv_channel_count(&self) -> usize {
        self.uv_channels
    }

    fn face_corner_uv(&self, face: usize, channel: usize, corner: usize) -> Option<Uv> {
        self.faces
            .get(face)?
            .uvs
            .get(channel)?
            .get(corner)
            .copied()
            .flatten()
    }

    fn material_count(&self) -> usize {
        self.materials.len()
    }

    fn material_name(&self, index: u32) -> Option<&str> {
        self.materials.get(index as usize).map(String::as_str)
    }
}
