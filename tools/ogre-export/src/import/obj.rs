//! OBJ import
//!
//! Each `o` statement starts a new object with its own vertex numbering.
//! `usemtl` selects a material by name; faces keep their original corner
//! count so unsupported polygons are reported by the converter rather than
//! silently fanned. Groups (`g`), smoothing groups and `mtllib` are ignored.

use anyhow::{bail, Context, Result};
use hashbrown::HashMap;
use smallvec::SmallVec;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::source::{SourceFace, SourceMesh, Uv};

/// Material assigned to faces that precede any `usemtl` in an object that has materials
const DEFAULT_MATERIAL: &str = "DefaultMaterial";

/// Resolved corner: (position, texcoord, normal) indices into the file-wide arrays
type ObjCorner = (usize, Option<usize>, Option<usize>);

/// Load every object of an OBJ file
pub fn load_obj(input: &Path) -> Result<Vec<SourceMesh>> {
    let file = File::open(input).with_context(|| format!("Failed to open OBJ: {:?}", input))?;
    let name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Object");
    parse_obj(BufReader::new(file), name)
        .with_context(|| format!("Failed to parse OBJ: {:?}", input))
}

/// Parse OBJ text; faces before the first `o` belong to an object named `default_name`
pub fn parse_obj<R: BufRead>(reader: R, default_name: &str) -> Result<Vec<SourceMesh>> {
    let mut positions: Vec<[f64; 3]> = Vec::new();
    let mut tex_coords: Vec<Uv> = Vec::new();
    let mut normals: Vec<[f64; 3]> = Vec::new();

    let mut objects: Vec<SourceMesh> = Vec::new();
    let mut current = ObjectBuilder::new(default_name);
    let mut material: Option<String> = None;

    for (line_index, line) in reader.lines().enumerate() {
        let line_no = line_index + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" => positions.push(parse_floats(&parts[1..], line_no)?),
            "vt" => tex_coords.push(parse_floats(&parts[1..], line_no)?),
            "vn" => normals.push(parse_floats(&parts[1..], line_no)?),
            "o" => {
                let name = line[1..].trim();
                let name = if name.is_empty() {
                    format!("Object.{}", objects.len() + 1)
                } else {
                    name.to_string()
                };
                if let Some(mesh) = std::mem::replace(&mut current, ObjectBuilder::new(&name)).finish() {
                    objects.push(mesh);
                }
            }
            "usemtl" => {
                let name = line["usemtl".len()..].trim();
                material = (!name.is_empty()).then(|| name.to_string());
            }
            "f" => {
                let corners = parts[1..]
                    .iter()
                    .map(|s| {
                        parse_obj_vertex(s, positions.len(), tex_coords.len(), normals.len())
                            .with_context(|| format!("line {}: invalid face vertex '{}'", line_no, s))
                    })
                    .collect::<Result<Vec<ObjCorner>>>()?;
                let slot = material.as_deref().map(|m| current.mesh.material_slot(m));
                current.push_face(&corners, slot, &positions, &tex_coords, &normals);
            }
            _ => {}
        }
    }

    if let Some(mesh) = current.finish() {
        objects.push(mesh);
    }

    if objects.is_empty() {
        bail!("No faces found in OBJ file");
    }

    tracing::debug!(
        objects = objects.len(),
        positions = positions.len(),
        tex_coords = tex_coords.len(),
        normals = normals.len(),
        "Parsed OBJ"
    );

    Ok(objects)
}

/// Object under construction, with file-wide indices remapped to local ones
struct ObjectBuilder {
    mesh: SourceMesh,
    remap: HashMap<usize, u32>,
    normals: Vec<Option<[f64; 3]>>,
    materials: Vec<Option<u32>>,
    corner_uvs: Vec<SmallVec<[Option<Uv>; 4]>>,
}

impl ObjectBuilder {
    fn new(name: &str) -> Self {
        Self {
            mesh: SourceMesh::new(name),
            remap: HashMap::new(),
            normals: Vec::new(),
            materials: Vec::new(),
            corner_uvs: Vec::new(),
        }
    }

    fn push_face(
        &mut self,
        corners: &[ObjCorner],
        material: Option<u32>,
        positions: &[[f64; 3]],
        tex_coords: &[Uv],
        normals: &[[f64; 3]],
    ) {
        let mut vertices: SmallVec<[u32; 4]> = SmallVec::with_capacity(corners.len());
        let mut uvs: SmallVec<[Option<Uv>; 4]> = SmallVec::with_capacity(corners.len());

        for &(vi, vti, vni) in corners {
            let local = *self.remap.entry(vi).or_insert_with(|| {
                self.mesh.positions.push(positions[vi]);
                self.normals.push(None);
                (self.mesh.positions.len() - 1) as u32
            });

            // First normal referenced for a vertex wins
            if let Some(ni) = vni {
                self.normals[local as usize].get_or_insert(normals[ni]);
            }

            vertices.push(local);
            uvs.push(vti.map(|ti| tex_coords[ti]));
        }

        self.mesh.faces.push(SourceFace {
            vertices,
            material: 0,
            uvs: Vec::new(),
        });
        self.materials.push(material);
        self.corner_uvs.push(uvs);
    }

    /// Finish the object, or `None` if it has no faces
    fn finish(self) -> Option<SourceMesh> {
        let Self {
            mut mesh,
            normals,
            materials,
            corner_uvs,
            ..
        } = self;

        if mesh.faces.is_empty() {
            return None;
        }

        let has_materials = !mesh.materials.is_empty();
        let default_slot = if has_materials && materials.iter().any(Option::is_none) {
            Some(mesh.material_slot(DEFAULT_MATERIAL))
        } else {
            None
        };

        let has_uvs = corner_uvs.iter().flatten().any(Option::is_some);
        mesh.uv_channels = usize::from(has_uvs);

        for ((face, material), uvs) in mesh.faces.iter_mut().zip(materials).zip(corner_uvs) {
            face.material = material.or(default_slot).unwrap_or(0);
            if has_uvs {
                face.uvs = vec![uvs];
            }
        }

        if normals.iter().all(Option::is_some) {
            mesh.normals = Some(normals.into_iter().flatten().collect());
        } else if normals.iter().any(Option::is_some) {
            tracing::warn!(
                object = mesh.name.as_str(),
                "Some vertices have no normal, ignoring normals"
            );
        }

        Some(mesh)
    }
}

/// Parse up to `N` floats; missing trailing components (e.g. `vt u`) are zero
fn parse_floats<const N: usize>(parts: &[&str], line_no: usize) -> Result<[f64; N]> {
    if parts.is_empty() || (N == 3 && parts.len() < 3) {
        bail!("line {}: expected {} components", line_no, N);
    }

    let mut values = [0.0; N];
    for (value, part) in values.iter_mut().zip(parts) {
        *value = part
            .parse()
            .with_context(|| format!("line {}: invalid number '{}'", line_no, part))?;
    }
    Ok(values)
}

/// Parse OBJ vertex reference: "v", "v/vt", "v/vt/vn", or "v//vn"
///
/// Indices are 1-based; negative indices count back from the last element.
fn parse_obj_vertex(
    s: &str,
    position_count: usize,
    tex_coord_count: usize,
    normal_count: usize,
) -> Result<ObjCorner> {
    let parts: Vec<&str> = s.split('/').collect();

    let vi = resolve_index(parts[0], position_count)?;

    let vti = match parts.get(1).filter(|s| !s.is_empty()) {
        Some(s) => Some(resolve_index(s, tex_coord_count)?),
        None => None,
    };

    let vni = match parts.get(2).filter(|s| !s.is_empty()) {
        Some(s) => Some(resolve_index(s, normal_count)?),
        None => None,
    };

    Ok((vi, vti, vni))
}

fn resolve_index(s: &str, count: usize) -> Result<usize> {
    let raw: i64 = s.parse().with_context(|| format!("invalid index '{}'", s))?;
    let index = match raw {
        0 => bail!("index 0 is not valid (OBJ indices start at 1)"),
        i if i > 0 => (i - 1) as usize,
        i => match count.checked_sub(i.unsigned_abs() as usize) {
            Some(index) => index,
            None => bail!("relative index {} reaches before the first element", i),
        },
    };

    if index >= count {
        bail!("index {} out of range ({} defined)", raw, count);
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::GeometrySource;

    fn parse(text: &str) -> Vec<SourceMesh> {
        parse_obj(text.as_bytes(), "scene").unwrap()
    }

    const TWO_OBJECTS: &str = "\
# two quads, one per object
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
o Floor
usemtl Stone
f 1/1/1 2/2/1 3/3/1 4/4/1
usemtl Moss
f 1/1/1 3/3/1 4/4/1
o Wall
usemtl Brick
f 1/1 2/2 6/3 5/4
";

    #[test]
    fn test_objects_and_materials() {
        let objects = parse(TWO_OBJECTS);
        assert_eq!(objects.len(), 2);

        let floor = &objects[0];
        assert_eq!(floor.object_name(), "Floor");
        assert_eq!(floor.vertex_count(), 4);
        assert_eq!(floor.materials, vec!["Stone", "Moss"]);
        assert_eq!(floor.face_vertex_indices(0), &[0, 1, 2, 3]);
        assert_eq!(floor.face_material_index(1), 1);
        assert_eq!(floor.uv_channel_count(), 1);
        assert_eq!(floor.face_corner_uv(0, 0, 2), Some([1.0, 1.0]));
        assert!(floor.has_normals());

        let wall = &objects[1];
        assert_eq!(wall.object_name(), "Wall");
        // Local numbering: file vertices 1, 2, 6, 5
        assert_eq!(wall.face_vertex_indices(0), &[0, 1, 2, 3]);
        assert_eq!(wall.vertex_position(2), [1.0, 0.0, 1.0]);
        assert_eq!(wall.materials, vec!["Brick"]);
        assert!(!wall.has_normals());
    }

    #[test]
    fn test_faces_before_first_object() {
        let objects = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "scene");
        assert_eq!(objects[0].material_count(), 0);
        assert_eq!(objects[0].uv_channel_count(), 0);
    }

    #[test]
    fn test_relative_indices() {
        let objects = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n");
        assert_eq!(objects[0].face_vertex_indices(0), &[0, 1, 2]);
    }

    #[test]
    fn test_polygons_keep_their_arity() {
        let objects = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv -1 0 0\nf 1 2 3 4 5\n");
        assert_eq!(objects[0].face_vertex_indices(0).len(), 5);
    }

    #[test]
    fn test_missing_texcoord_reference_left_empty() {
        let objects = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nf 1/1 2/2 3\n");
        let mesh = &objects[0];
        assert_eq!(mesh.uv_channel_count(), 1);
        assert_eq!(mesh.face_corner_uv(0, 0, 1), Some([1.0, 0.0]));
        assert_eq!(mesh.face_corner_uv(0, 0, 2), None);
    }

    #[test]
    fn test_faces_without_material_get_default() {
        let objects = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nusemtl Paint\nf 3 2 1\n");
        let mesh = &objects[0];
        assert_eq!(mesh.materials, vec!["Paint", DEFAULT_MATERIAL]);
        assert_eq!(mesh.face_material_index(0), 1);
        assert_eq!(mesh.face_material_index(1), 0);
    }

    #[test]
    fn test_material_carries_into_next_object() {
        let objects = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl Paint\no A\nf 1 2 3\no B\nf 1 2 3\n");
        assert_eq!(objects[1].materials, vec!["Paint"]);
    }

    #[test]
    fn test_empty_objects_skipped() {
        let objects = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\no Empty\no Full\nf 1 2 3\n");
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "Full");
    }

    #[test]
    fn test_invalid_input_rejected() {
        assert!(parse_obj("v 0 0 0\nf 1 2 3\n".as_bytes(), "x").is_err());
        assert!(parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n".as_bytes(), "x").is_err());
        assert!(parse_obj("v 0 zero 0\n".as_bytes(), "x").is_err());
        assert!(parse_obj("v 0 0 0\n".as_bytes(), "x").is_err());
    }
}
