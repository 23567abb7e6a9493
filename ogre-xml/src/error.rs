//! Error types for building and writing mesh documents.

use thiserror::Error;

/// Result type for document construction and emission.
pub type XmlResult<T> = Result<T, XmlError>;

/// Errors raised while assembling or writing an OGRE XML mesh document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    /// The submesh name table does not pair 1:1 with the submeshes.
    #[error("submesh name table has {names} entries for {submeshes} submeshes")]
    NameTableMismatch {
        /// Number of submeshes in the document.
        submeshes: usize,
        /// Number of entries in the name table.
        names: usize,
    },

    /// A submesh name index does not match its position in the table.
    #[error("submesh name '{name}' has index {index}, expected {expected}")]
    NameIndexOutOfOrder {
        /// Display name of the offending entry.
        name: String,
        /// Index carried by the entry.
        index: u32,
        /// Index implied by emission order.
        expected: u32,
    },

    /// A face references a vertex past the end of its submesh's vertex buffer.
    #[error("face {face} references vertex {index}, but the vertex buffer has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        /// Position of the face in its submesh.
        face: usize,
        /// Offending vertex index.
        index: u32,
        /// Size of the vertex buffer.
        vertex_count: usize,
    },

    /// A vertex disagrees with the attribute layout declared by its buffer.
    #[error("vertex {vertex}: {message}")]
    VertexAttributeMismatch {
        /// Position of the vertex in its buffer.
        vertex: usize,
        /// What did not match.
        message: String,
    },

    /// The underlying writer failed.
    #[error("failed to write {element}: {message}")]
    Write {
        /// Element being written when the failure happened.
        element: &'static str,
        /// Error reported by the writer.
        message: String,
    },
}

impl XmlError {
    pub(crate) fn write(element: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Write {
            element,
            message: err.to_string(),
        }
    }
}
