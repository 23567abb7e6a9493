//! OGRE XML output
//!
//! Lowers an assembled [`MeshDocument`] into the typed `ogre-xml` tree,
//! resolving positions and normals through each submesh's source object.

use ogre_xml::{
    GeometryXml, MeshXml, SubmeshNameXml, SubmeshXml, VertexBufferXml, VertexXml,
};

use crate::error::Result;
use crate::mesh::{MeshDocument, Submesh};
use crate::source::GeometrySource;

/// Options applied while lowering to XML
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlOptions {
    /// Write `v` as `1 - v` (bottom-left UV origin to OGRE's top-left)
    pub flip_v: bool,
    /// Write normals when the source object has them
    pub normals: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            flip_v: true,
            normals: true,
        }
    }
}

/// Build the document tree for an assembled mesh.
///
/// `objects` must be the same slice, in the same order, that was assembled.
pub fn build_mesh_xml(
    document: &MeshDocument,
    objects: &[&dyn GeometrySource],
    options: &XmlOptions,
) -> Result<MeshXml> {
    let submeshes = document
        .submeshes
        .iter()
        .map(|submesh| build_submesh_xml(submesh, objects[submesh.object], options))
        .collect::<Result<Vec<_>>>()?;

    let names = document
        .names
        .iter()
        .map(|entry| SubmeshNameXml {
            name: entry.name.clone(),
            index: entry.index,
        })
        .collect();

    Ok(MeshXml::new(submeshes, names)?)
}

fn build_submesh_xml(
    submesh: &Submesh,
    source: &dyn GeometrySource,
    options: &XmlOptions,
) -> Result<SubmeshXml> {
    let normals = options.normals && source.has_normals();

    let vertices = submesh
        .vertices
        .iter()
        .map(|vertex| VertexXml {
            position: source.vertex_position(vertex.source),
            normal: normals.then(|| source.vertex_normal(vertex.source)),
            texcoords: vertex
                .uvs
                .iter()
                .map(|&[u, v]| if options.flip_v { [u, 1.0 - v] } else { [u, v] })
                .collect(),
        })
        .collect();

    let vertex_buffer = VertexBufferXml::new(normals, source.uv_channel_count(), vertices)?;
    let submesh_xml = SubmeshXml::new(
        submesh.material.clone(),
        submesh.triangles.clone(),
        GeometryXml { vertex_buffer },
    )?;
    Ok(submesh_xml)
}
