//! Mesh assembly
//!
//! Turns the selected objects into one [`MeshDocument`]: faces are grouped
//! by material per object, each group becomes a submesh, and submeshes get
//! global indices and display names in emission order.

use hashbrown::HashMap;
use rayon::prelude::*;

use super::submesh::build_submesh;
use super::types::{MeshDocument, Submesh, SubmeshName};
use crate::error::{ExportError, Result};
use crate::source::GeometrySource;

/// Faces of one material, in host face order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialGroup {
    pub material: u32,
    pub faces: Vec<usize>,
}

/// Group an object's faces by material.
///
/// Groups are ordered by first occurrence of each material index. A mesh
/// without materials yields a single group for material 0.
pub fn group_faces<S>(source: &S) -> Vec<MaterialGroup>
where
    S: GeometrySource + ?Sized,
{
    let face_count = source.face_count();
    if source.material_count() == 0 {
        if face_count == 0 {
            return Vec::new();
        }
        return vec![MaterialGroup {
            material: 0,
            faces: (0..face_count).collect(),
        }];
    }

    let mut slots: HashMap<u32, usize> = HashMap::new();
    let mut groups: Vec<MaterialGroup> = Vec::new();
    for face in 0..face_count {
        let material = source.face_material_index(face);
        let slot = *slots.entry(material).or_insert_with(|| {
            groups.push(MaterialGroup {
                material,
                faces: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].faces.push(face);
    }
    groups
}

/// Assemble the selected objects into one document.
///
/// The caller passes exactly the objects to export. `max_objects` is the
/// number the export mode allows (`None` for no limit); an empty selection
/// or one over the limit is rejected before any welding starts.
pub fn assemble(objects: &[&dyn GeometrySource], max_objects: Option<usize>) -> Result<MeshDocument> {
    if objects.is_empty() {
        return Err(ExportError::NoSelection);
    }
    if let Some(max) = max_objects {
        if objects.len() > max {
            return Err(ExportError::AmbiguousSelection {
                count: objects.len(),
                max,
            });
        }
    }

    let multiple = objects.len() > 1;
    let mut document = MeshDocument::default();

    for (object, &source) in objects.iter().enumerate() {
        let groups = group_faces(source);
        tracing::debug!(
            object = source.object_name(),
            faces = source.face_count(),
            groups = groups.len(),
            "Assembling object"
        );

        // Groups are independent; collect keeps discovery order
        let submeshes: Vec<Submesh> = groups
            .par_iter()
            .map(|group| build_submesh(source, object, group.material, &group.faces))
            .collect::<Result<_>>()?;

        for submesh in submeshes {
            let name = submesh_name(source.object_name(), submesh.material.as_deref(), multiple);
            document.names.push(SubmeshName {
                name,
                index: document.submeshes.len() as u32,
            });
            document.submeshes.push(submesh);
        }
    }

    Ok(document)
}

/// Display name for a submesh.
///
/// `object.material` when several objects are exported, the material name
/// alone for a single object, and the object name when there is no material.
pub fn submesh_name(object: &str, material: Option<&str>, multiple_objects: bool) -> String {
    match material {
        Some(material) if multiple_objects => format!("{object}.{material}"),
        Some(material) => material.to_string(),
        None => object.to_string(),
    }
}
