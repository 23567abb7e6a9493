//! OGRE XML mesh documents
//!
//! This crate owns the textual side of the exporter:
//! - `ogre-export` (asset pipeline) builds a [`MeshXml`] tree
//! - [`write_mesh_xml`] renders it as `.mesh.xml` markup
//!
//! # Modules
//!
//! - [`nodes`] - One record per element of the mesh schema, validated at construction
//! - [`writer`] - Streaming XML writer (quick-xml)
//! - [`error`] - Construction and write errors

pub mod error;
pub mod nodes;
pub mod writer;

pub use error::{XmlError, XmlResult};
pub use nodes::{
    GeometryXml, MeshXml, OperationType, SubmeshNameXml, SubmeshXml, VertexBufferXml, VertexXml,
    TEXTURE_COORD_DIMENSIONS,
};
pub use writer::{to_xml_string, write_mesh_xml};
