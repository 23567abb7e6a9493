//! Mesh-to-submesh conversion
//!
//! Source faces -> triangulate -> weld per material -> assembled document.

mod assemble;
mod submesh;
mod triangulate;
mod types;
mod weld;

// Re-export public API
pub use assemble::{assemble, group_faces, submesh_name, MaterialGroup};
pub use submesh::build_submesh;
pub use triangulate::triangulate;
pub use types::{
    MeshDocument, OutputVertex, Submesh, SubmeshName, Triangle, UvSet, MAX_SUBMESH_VERTICES,
    UV_EPSILON,
};
pub use weld::{uvs_match, VertexWelder};
