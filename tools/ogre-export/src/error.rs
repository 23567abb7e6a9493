//! Error types for mesh-to-submesh conversion.

use thiserror::Error;

/// Result type for the conversion core.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors raised while converting source meshes into a mesh document.
///
/// The core never retries and never recovers: every variant aborts the
/// whole export, and nothing is written.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A face is neither a triangle nor a quad.
    #[error("face {face} has {arity} corners (only triangles and quads are supported)")]
    UnsupportedFaceArity { face: usize, arity: usize },

    /// The caller supplied no objects to export.
    #[error("no objects selected for export")]
    NoSelection,

    /// The caller supplied more objects than the export mode allows.
    #[error("{count} objects selected, but this export allows at most {max}")]
    AmbiguousSelection { count: usize, max: usize },

    /// A UV channel is declared but a face corner carries no data for it.
    #[error("face {face} corner {corner} has no data for UV channel {channel}")]
    MissingUvChannelData {
        face: usize,
        channel: usize,
        corner: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    InvalidVertexIndex {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A face references a material slot that does not exist.
    #[error("face {face} uses material {material}, but the mesh has {material_count} materials")]
    InvalidMaterialIndex {
        face: usize,
        material: u32,
        material_count: usize,
    },

    /// A submesh welded more vertices than 16-bit indices can address.
    #[error("submesh for material {material} has {count} vertices, exceeds maximum {max} for 16-bit indices")]
    TooManyVertices { material: u32, count: usize, max: usize },

    /// The document tree rejected the converted data.
    #[error(transparent)]
    Document(#[from] ogre_xml::XmlError),
}
