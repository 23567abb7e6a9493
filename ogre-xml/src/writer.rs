//! Streaming writer for [`MeshXml`] documents.
//!
//! Attributes are written in schema order. Floats use Rust's shortest
//! round-trip formatting, indices and counts are base-10 integers.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::error::{XmlError, XmlResult};
use crate::nodes::{MeshXml, SubmeshXml, VertexBufferXml, VertexXml, TEXTURE_COORD_DIMENSIONS};

/// Write a complete `.mesh.xml` document.
pub fn write_mesh_xml<W: Write>(w: &mut W, mesh: &MeshXml) -> XmlResult<()> {
    let mut writer = Writer::new_with_indent(w, b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| XmlError::write("XML declaration", e))?;

    open(&mut writer, "mesh", &[])?;

    if mesh.submeshes().is_empty() {
        empty(&mut writer, "submeshes", &[])?;
    } else {
        open(&mut writer, "submeshes", &[])?;
        for submesh in mesh.submeshes() {
            write_submesh(&mut writer, submesh)?;
        }
        close(&mut writer, "submeshes")?;
    }

    if mesh.submesh_names().is_empty() {
        empty(&mut writer, "submeshnames", &[])?;
    } else {
        open(&mut writer, "submeshnames", &[])?;
        for entry in mesh.submesh_names() {
            let index = entry.index.to_string();
            empty(
                &mut writer,
                "submeshname",
                &[("name", entry.name.as_str()), ("index", index.as_str())],
            )?;
        }
        close(&mut writer, "submeshnames")?;
    }

    close(&mut writer, "mesh")
}

/// Render a document into a string.
pub fn to_xml_string(mesh: &MeshXml) -> XmlResult<String> {
    let mut buffer = Vec::new();
    write_mesh_xml(&mut buffer, mesh)?;
    String::from_utf8(buffer).map_err(|e| XmlError::write("document", e))
}

fn write_submesh<W: Write>(writer: &mut Writer<W>, submesh: &SubmeshXml) -> XmlResult<()> {
    let mut attrs: Vec<(&str, &str)> = Vec::with_capacity(4);
    if let Some(material) = submesh.material() {
        attrs.push(("material", material));
    }
    attrs.push(("usesharedvertices", bool_str(submesh.use_shared_vertices())));
    attrs.push(("use32bitindexes", bool_str(submesh.use_32bit_indexes())));
    attrs.push(("operationtype", submesh.operation_type().as_str()));
    open(writer, "submesh", &attrs)?;

    let count = submesh.faces().len().to_string();
    if submesh.faces().is_empty() {
        empty(writer, "faces", &[("count", count.as_str())])?;
    } else {
        open(writer, "faces", &[("count", count.as_str())])?;
        for &[v1, v2, v3] in submesh.faces() {
            empty(
                writer,
                "face",
                &[
                    ("v1", v1.to_string().as_str()),
                    ("v2", v2.to_string().as_str()),
                    ("v3", v3.to_string().as_str()),
                ],
            )?;
        }
        close(writer, "faces")?;
    }

    let geometry = submesh.geometry();
    let vertex_count = geometry.vertex_count().to_string();
    open(writer, "geometry", &[("vertexcount", vertex_count.as_str())])?;
    write_vertex_buffer(writer, &geometry.vertex_buffer)?;
    close(writer, "geometry")?;

    close(writer, "submesh")
}

fn write_vertex_buffer<W: Write>(writer: &mut Writer<W>, buffer: &VertexBufferXml) -> XmlResult<()> {
    let mut owned: Vec<(String, String)> = vec![("positions".into(), "true".into())];
    if buffer.normals() {
        owned.push(("normals".into(), "true".into()));
    }
    owned.push(("texture_coords".into(), buffer.texture_coords().to_string()));
    for i in 0..buffer.texture_coords() {
        owned.push((
            format!("texture_coord_dimensions_{i}"),
            TEXTURE_COORD_DIMENSIONS.to_string(),
        ));
    }
    let attrs: Vec<(&str, &str)> = owned
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    if buffer.vertices().is_empty() {
        return empty(writer, "vertexbuffer", &attrs);
    }

    open(writer, "vertexbuffer", &attrs)?;
    for vertex in buffer.vertices() {
        write_vertex(writer, vertex)?;
    }
    close(writer, "vertexbuffer")
}

fn write_vertex<W: Write>(writer: &mut Writer<W>, vertex: &VertexXml) -> XmlResult<()> {
    open(writer, "vertex", &[])?;

    write_xyz(writer, "position", vertex.position)?;

    if let Some(normal) = vertex.normal {
        write_xyz(writer, "normal", normal)?;
    }

    for &[u, v] in &vertex.texcoords {
        let (u, v) = (u.to_string(), v.to_string());
        empty(writer, "texcoord", &[("u", u.as_str()), ("v", v.as_str())])?;
    }

    close(writer, "vertex")
}

fn write_xyz<W: Write>(writer: &mut Writer<W>, tag: &'static str, [x, y, z]: [f64; 3]) -> XmlResult<()> {
    let (x, y, z) = (x.to_string(), y.to_string(), z.to_string());
    empty(
        writer,
        tag,
        &[("x", x.as_str()), ("y", y.as_str()), ("z", z.as_str())],
    )
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn element<'a>(tag: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(tag);
    for &attr in attrs {
        start.push_attribute(attr);
    }
    start
}

fn open<W: Write>(writer: &mut Writer<W>, tag: &'static str, attrs: &[(&str, &str)]) -> XmlResult<()> {
    writer
        .write_event(Event::Start(element(tag, attrs)))
        .map_err(|e| XmlError::write(tag, e))
}

fn empty<W: Write>(writer: &mut Writer<W>, tag: &'static str, attrs: &[(&str, &str)]) -> XmlResult<()> {
    writer
        .write_event(Event::Empty(element(tag, attrs)))
        .map_err(|e| XmlError::write(tag, e))
}

fn close<W: Write>(writer: &mut Writer<W>, tag: &'static str) -> XmlResult<()> {
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(|e| XmlError::write(tag, e))
}
