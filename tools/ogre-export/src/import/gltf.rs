//! glTF/GLB import
//!
//! Every glTF mesh becomes one object and every primitive contributes its
//! triangles under the primitive's material. Texture coordinate sets present
//! on all primitives of a mesh become UV channels. glTF places the UV origin
//! top-left, so `v` is stored as `1 - v` to match OBJ.

use ::gltf::mesh::Mode;
use anyhow::{bail, Context, Result};
use smallvec::SmallVec;
use std::path::Path;

use crate::source::{SourceMesh, Uv};

/// Name used for primitives without a material
const DEFAULT_MATERIAL: &str = "DefaultMaterial";

/// Load every mesh of a glTF/GLB file as an object
pub fn load_gltf(input: &Path) -> Result<Vec<SourceMesh>> {
    let (document, buffers, _images) =
        ::gltf::import(input).with_context(|| format!("Failed to load glTF: {:?}", input))?;

    let mut objects = Vec::new();
    for mesh in document.meshes() {
        let name = mesh
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Mesh.{}", mesh.index()));

        let object =
            load_mesh(&mesh, &buffers, &name).with_context(|| format!("In mesh '{}'", name))?;
        match object {
            Some(object) => objects.push(object),
            None => tracing::warn!(mesh = name.as_str(), "Mesh has no triangles, skipping"),
        }
    }

    if objects.is_empty() {
        bail!("No meshes found in glTF");
    }

    Ok(objects)
}

fn load_mesh(
    mesh: &::gltf::Mesh,
    buffers: &[::gltf::buffer::Data],
    name: &str,
) -> Result<Option<SourceMesh>> {
    // Only sets every primitive carries can be addressed per face
    let channels = mesh
        .primitives()
        .map(|primitive| {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
            (0u32..)
                .take_while(|&set| reader.read_tex_coords(set).is_some())
                .count()
        })
        .min()
        .unwrap_or(0);

    let mut object = SourceMesh::new(name).with_uv_channels(channels);
    let mut normals: Vec<[f64; 3]> = Vec::new();
    let mut all_normals = true;

    for primitive in mesh.primitives() {
        let index = primitive.index();
        if primitive.mode() != Mode::Triangles {
            bail!(
                "Primitive {} uses {:?}, only triangle lists are supported",
                index,
                primitive.mode()
            );
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .with_context(|| format!("No positions in primitive {}", index))?
            .collect();
        let count = positions.len();

        let mut uvs: Vec<Vec<Uv>> = Vec::with_capacity(channels);
        for set in 0..channels as u32 {
            let coords: Vec<Uv> = reader
                .read_tex_coords(set)
                .with_context(|| format!("No TEXCOORD_{} in primitive {}", set, index))?
                .into_f32()
                .map(|[u, v]| [u as f64, 1.0 - v as f64])
                .collect();
            if coords.len() != count {
                bail!(
                    "TEXCOORD_{} of primitive {} has {} entries for {} vertices",
                    set,
                    index,
                    coords.len(),
                    count
                );
            }
            uvs.push(coords);
        }

        match reader.read_normals() {
            Some(iter) if all_normals => normals.extend(iter.map(widen)),
            _ => all_normals = false,
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(iter) => iter.into_u32().collect(),
            None => (0..count as u32).collect(),
        };
        if indices.len() % 3 != 0 {
            bail!(
                "Primitive {} has {} indices, not a multiple of 3",
                index,
                indices.len()
            );
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= count) {
            bail!(
                "Primitive {} index {} out of range ({} vertices)",
                index,
                bad,
                count
            );
        }

        let material = object.material_slot(&material_name(&primitive.material()));
        let offset = object.positions.len() as u32;

        for triangle in indices.chunks_exact(3) {
            let corner_uvs: SmallVec<[[Uv; 3]; 2]> = uvs
                .iter()
                .map(|set| {
                    [
                        set[triangle[0] as usize],
                        set[triangle[1] as usize],
                        set[triangle[2] as usize],
                    ]
                })
                .collect();
            let channel_refs: SmallVec<[&[Uv]; 2]> =
                corner_uvs.iter().map(|corners| corners.as_slice()).collect();
            object.push_face(&triangle_offset(triangle, offset), material, &channel_refs);
        }

        object.positions.extend(positions.into_iter().map(widen));
    }

    if object.faces.is_empty() {
        return Ok(None);
    }
    if all_normals {
        object.normals = Some(normals);
    }

    tracing::debug!(
        object = name,
        vertices = object.positions.len(),
        faces = object.faces.len(),
        materials = object.materials.len(),
        channels,
        "Loaded glTF mesh"
    );

    Ok(Some(object))
}

fn triangle_offset(triangle: &[u32], offset: u32) -> [u32; 3] {
    [
        triangle[0] + offset,
        triangle[1] + offset,
        triangle[2] + offset,
    ]
}

fn material_name(material: &::gltf::Material) -> String {
    match (material.name(), material.index()) {
        (Some(name), _) => name.to_string(),
        (None, Some(index)) => format!("Material.{}", index),
        (None, None) => DEFAULT_MATERIAL.to_string(),
    }
}

fn widen([x, y, z]: [f32; 3]) -> [f64; 3] {
    [x as f64, y as f64, z as f64]
}
