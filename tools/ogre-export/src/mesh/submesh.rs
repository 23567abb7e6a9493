//! Submesh building
//!
//! Triangulates the faces of one material group and welds their corners
//! into a dedicated vertex buffer.

use super::triangulate::triangulate;
use super::types::{Submesh, Triangle, UvSet, MAX_SUBMESH_VERTICES};
use super::weld::VertexWelder;
use crate::error::{ExportError, Result};
use crate::source::GeometrySource;

/// Build the submesh for one material group.
///
/// `faces` are host face indices in host order. Triangles come out in
/// face-then-triangle order; the vertex buffer is the welder's creation order.
/// On error nothing is returned, not even the triangles built so far.
pub fn build_submesh<S>(source: &S, object: usize, material_index: u32, faces: &[usize]) -> Result<Submesh>
where
    S: GeometrySource + ?Sized,
{
    let material = if source.material_count() > 0 {
        let name = source.material_name(material_index).ok_or_else(|| {
            ExportError::InvalidMaterialIndex {
                face: faces.first().copied().unwrap_or_default(),
                material: material_index,
                material_count: source.material_count(),
            }
        })?;
        Some(name.to_string())
    } else {
        None
    };

    let vertex_count = source.vertex_count();
    let channels = source.uv_channel_count();
    let mut welder = VertexWelder::new();
    let mut triangles: Vec<Triangle> = Vec::with_capacity(faces.len() * 2);

    for &face in faces {
        let corners = source.face_vertex_indices(face);
        let split = triangulate(face, corners.len())?;

        if let Some(&index) = corners.iter().find(|&&v| v as usize >= vertex_count) {
            return Err(ExportError::InvalidVertexIndex {
                face,
                index,
                vertex_count,
            });
        }

        for slots in split {
            let mut triangle: Triangle = [0; 3];
            for (out, &slot) in triangle.iter_mut().zip(slots) {
                let uvs = corner_uvs(source, face, slot, channels)?;
                *out = welder.weld(corners[slot], &uvs);
            }
            triangles.push(triangle);
        }
    }

    if welder.vertex_count() > MAX_SUBMESH_VERTICES {
        return Err(ExportError::TooManyVertices {
            material: material_index,
            count: welder.vertex_count(),
            max: MAX_SUBMESH_VERTICES,
        });
    }

    tracing::debug!(
        object = source.object_name(),
        material = material.as_deref().unwrap_or("<none>"),
        faces = faces.len(),
        triangles = triangles.len(),
        vertices = welder.vertex_count(),
        "Built submesh"
    );

    Ok(Submesh {
        object,
        material_index,
        material,
        triangles,
        vertices: welder.into_vertices(),
    })
}

/// UVs of one face corner across every channel
fn corner_uvs<S>(source: &S, face: usize, corner: usize, channels: usize) -> Result<UvSet>
where
    S: GeometrySource + ?Sized,
{
    (0..channels)
        .map(|channel| {
            source
                .face_corner_uv(face, channel, corner)
                .ok_or(ExportError::MissingUvChannelData {
                    face,
                    channel,
                    corner,
                })
        })
        .collect()
}
