//! ogre-export library
//!
//! Converts polygon meshes (OBJ, glTF/GLB) into OGRE XML mesh documents: faces
//! are triangulated, split into one submesh per material, and vertices are
//! welded per submesh so each output vertex carries exactly one UV per channel.

pub mod error;
pub mod export;
pub mod formats;
pub mod import;
pub mod manifest;
pub mod mesh;
pub mod source;

pub use error::{ExportError, Result};

// Re-export key types for conversion
pub use export::{export_objects, normalize_output_path, ExportOptions};
pub use formats::{build_mesh_xml, XmlOptions};
pub use mesh::{assemble, MeshDocument, Submesh, SubmeshName};
pub use source::{GeometrySource, SourceFace, SourceMesh, Uv};
