//! Source importers (OBJ/glTF -> [`SourceMesh`])

mod gltf;
mod obj;

use anyhow::Result;
use std::path::Path;

use crate::source::SourceMesh;

pub use self::gltf::load_gltf;
pub use obj::{load_obj, parse_obj};

/// Load every object of a mesh file, detecting the format by extension
pub fn load_objects(input: &Path) -> Result<Vec<SourceMesh>> {
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "obj" => load_obj(input),
        "gltf" | "glb" => load_gltf(input),
        _ => anyhow::bail!(
            "Unsupported mesh format: {:?} (use .obj, .gltf, or .glb)",
            input
        ),
    }
}
