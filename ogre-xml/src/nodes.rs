//! OGRE XML mesh document tree
//!
//! Each element of the `.mesh.xml` schema has its own record carrying exactly
//! the attributes that element may hold. Records are checked when they are
//! built, so a tree that exists is always writable.
//!
//! # Layout
//! ```text
//! mesh
//! ├── submeshes
//! │   └── submesh [material?, usesharedvertices, use32bitindexes, operationtype]
//! │       ├── faces [count]
//! │       │   └── face [v1, v2, v3]
//! │       └── geometry [vertexcount]
//! │           └── vertexbuffer [positions, normals?, texture_coords, texture_coord_dimensions_N]
//! │               └── vertex
//! │                   ├── position [x, y, z]
//! │                   ├── normal [x, y, z]      (when normals="true")
//! │                   └── texcoord [u, v]       (one per texture_coords)
//! └── submeshnames
//!     └── submeshname [name, index]
//! ```

use crate::error::{XmlError, XmlResult};

/// Component count written for every `texture_coord_dimensions_N` attribute.
pub const TEXTURE_COORD_DIMENSIONS: u8 = 2;

/// Primitive topology of a submesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationType {
    #[default]
    TriangleList,
}

impl OperationType {
    /// Attribute value as written to `operationtype`.
    pub fn as_str(self) -> &'static str {
        match self {
            OperationType::TriangleList => "triangle_list",
        }
    }
}

/// `<vertex>` with its position, optional normal and texcoords.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexXml {
    pub position: [f64; 3],
    pub normal: Option<[f64; 3]>,
    pub texcoords: Vec<[f64; 2]>,
}

/// `<vertexbuffer>`: attribute layout plus the vertices that follow it.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBufferXml {
    normals: bool,
    texture_coords: usize,
    vertices: Vec<VertexXml>,
}

impl VertexBufferXml {
    /// Build a vertex buffer, checking that every vertex matches the declared layout.
    pub fn new(normals: bool, texture_coords: usize, vertices: Vec<VertexXml>) -> XmlResult<Self> {
        for (i, vertex) in vertices.iter().enumerate() {
            if vertex.normal.is_some() != normals {
                let message = if normals {
                    "buffer declares normals but vertex has none"
                } else {
                    "vertex has a normal but buffer declares none"
                };
                return Err(XmlError::VertexAttributeMismatch {
                    vertex: i,
                    message: message.to_string(),
                });
            }
            if vertex.texcoords.len() != texture_coords {
                return Err(XmlError::VertexAttributeMismatch {
                    vertex: i,
                    message: format!(
                        "{} texcoords, buffer declares {}",
                        vertex.texcoords.len(),
                        texture_coords
                    ),
                });
            }
        }

        Ok(Self {
            normals,
            texture_coords,
            vertices,
        })
    }

    pub fn normals(&self) -> bool {
        self.normals
    }

    pub fn texture_coords(&self) -> usize {
        self.texture_coords
    }

    pub fn vertices(&self) -> &[VertexXml] {
        &self.vertices
    }
}

/// `<geometry>`; `vertexcount` is derived from the buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryXml {
    pub vertex_buffer: VertexBufferXml,
}

impl GeometryXml {
    pub fn vertex_count(&self) -> usize {
        self.vertex_buffer.vertices.len()
    }
}

/// `<submesh>` with its faces and dedicated geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmeshXml {
    material: Option<String>,
    use_shared_vertices: bool,
    use_32bit_indexes: bool,
    operation_type: OperationType,
    faces: Vec<[u32; 3]>,
    geometry: GeometryXml,
}

impl SubmeshXml {
    /// Build a submesh with its own vertex buffer and 16-bit triangle-list indices.
    ///
    /// Fails if any face points outside the geometry.
    pub fn new(
        material: Option<String>,
        faces: Vec<[u32; 3]>,
        geometry: GeometryXml,
    ) -> XmlResult<Self> {
        let vertex_count = geometry.vertex_count();
        for (face, corners) in faces.iter().enumerate() {
            if let Some(&index) = corners.iter().find(|&&v| v as usize >= vertex_count) {
                return Err(XmlError::FaceIndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(Self {
            material,
            use_shared_vertices: false,
            use_32bit_indexes: false,
            operation_type: OperationType::TriangleList,
            faces,
            geometry,
        })
    }

    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    pub fn use_shared_vertices(&self) -> bool {
        self.use_shared_vertices
    }

    pub fn use_32bit_indexes(&self) -> bool {
        self.use_32bit_indexes
    }

    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub fn geometry(&self) -> &GeometryXml {
        &self.geometry
    }
}

/// `<submeshname>` entry of the name table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmeshNameXml {
    pub name: String,
    pub index: u32,
}

/// Root `<mesh>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshXml {
    submeshes: Vec<SubmeshXml>,
    submesh_names: Vec<SubmeshNameXml>,
}

impl MeshXml {
    /// Build the document root.
    ///
    /// The name table must pair 1:1 with the submeshes, with indices `0..n` in order.
    pub fn new(submeshes: Vec<SubmeshXml>, submesh_names: Vec<SubmeshNameXml>) -> XmlResult<Self> {
        if submeshes.len() != submesh_names.len() {
            return Err(XmlError::NameTableMismatch {
                submeshes: submeshes.len(),
                names: submesh_names.len(),
            });
        }

        for (expected, entry) in submesh_names.iter().enumerate() {
            let expected = expected as u32;
            if entry.index != expected {
                return Err(XmlError::NameIndexOutOfOrder {
                    name: entry.name.clone(),
                    index: entry.index,
                    expected,
                });
            }
        }

        Ok(Self {
            submeshes,
            submesh_names,
        })
    }

    pub fn submeshes(&self) -> &[SubmeshXml] {
        &self.submeshes
    }

    pub fn submesh_names(&self) -> &[SubmeshNameXml] {
        &self.submesh_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(uvs: usize) -> VertexXml {
        VertexXml {
            position: [0.0, 0.0, 0.0],
            normal: None,
            texcoords: vec![[0.0, 0.0]; uvs],
        }
    }

    fn geometry(count: usize) -> GeometryXml {
        GeometryXml {
            vertex_buffer: VertexBufferXml::new(false, 1, vec![vertex(1); count]).unwrap(),
        }
    }

    #[test]
    fn test_submesh_flags_fixed() {
        let submesh = SubmeshXml::new(Some("Mat".into()), vec![[0, 1, 2]], geometry(3)).unwrap();
        assert!(!submesh.use_shared_vertices());
        assert!(!submesh.use_32bit_indexes());
        assert_eq!(submesh.operation_type().as_str(), "triangle_list");
        assert_eq!(submesh.geometry().vertex_count(), 3);
    }

    #[test]
    fn test_submesh_rejects_face_past_buffer() {
        let err = SubmeshXml::new(None, vec![[0, 1, 2], [0, 2, 3]], geometry(3)).unwrap_err();
        assert_eq!(
            err,
            XmlError::FaceIndexOutOfRange {
                face: 1,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_vertex_buffer_texcoord_count_checked() {
        let err = VertexBufferXml::new(false, 2, vec![vertex(2), vertex(1)]).unwrap_err();
        assert!(matches!(
            err,
            XmlError::VertexAttributeMismatch { vertex: 1, .. }
        ));
    }

    #[test]
    fn test_vertex_buffer_normal_presence_checked() {
        assert!(VertexBufferXml::new(true, 0, vec![vertex(0)]).is_err());

        let mut with_normal = vertex(0);
        with_normal.normal = Some([0.0, 0.0, 1.0]);
        assert!(VertexBufferXml::new(false, 0, vec![with_normal.clone()]).is_err());
        assert!(VertexBufferXml::new(true, 0, vec![with_normal]).is_ok());
    }

    #[test]
    fn test_mesh_name_table_must_match() {
        let submesh = SubmeshXml::new(None, vec![], geometry(0)).unwrap();
        let err = MeshXml::new(vec![submesh], vec![]).unwrap_err();
        assert_eq!(
            err,
            XmlError::NameTableMismatch {
                submeshes: 1,
                names: 0
            }
        );
    }

    #[test]
    fn test_mesh_name_indices_in_order() {
        let submeshes = vec![
            SubmeshXml::new(None, vec![], geometry(0)).unwrap(),
            SubmeshXml::new(None, vec![], geometry(0)).unwrap(),
        ];
        let names = vec![
            SubmeshNameXml {
                name: "a".into(),
                index: 0,
            },
            SubmeshNameXml {
                name: "b".into(),
                index: 2,
            },
        ];
        let err = MeshXml::new(submeshes, names).unwrap_err();
        assert!(matches!(
            err,
            XmlError::NameIndexOutOfOrder {
                index: 2,
                expected: 1,
                ..
            }
        ));
    }
}
