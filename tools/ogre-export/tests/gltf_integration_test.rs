//! Integration tests for GLTF/GLB import pipeline.
//!
//! Tests the complete flow:
//! 1. Generate GLB programmatically
//! 2. Load and convert through ogre-export
//! 3. Validate the mesh XML


use std::process::Command;
use tempfile::tempdir;

use ogre_export::export::{export_objects, ExportOptions};
use ogre_export::import::load_gltf;
use ogre_export::GeometrySource;

/// Test that every glTF mesh becomes an object with one material per primitive
#[test]
fn test_load_gltf_objects() {
    let dir = tempdir().expect("Failed to create temp dir");
    let glb_path = dir.path().join("crate.glb");
    std::fs::write(&glb_path, gltf_generator::generate_crate_glb()).expect("Failed to write GLB");

    let objects = load_gltf(&glb_path).expect("Failed to load GLB");
    assert_eq!(objects.len(), 2);

    let crate_mesh = &objects[0];
    assert_eq!(crate_mesh.object_name(), "Crate");
    assert_eq!(crate_mesh.vertex_count(), 8, "Primitives keep separate vertices");
    assert_eq!(crate_mesh.face_count(), 4);
    assert_eq!(crate_mesh.materials, vec!["Wood", "Metal"]);
    assert_eq!(crate_mesh.face_material_index(2), 1);
    assert_eq!(crate_mesh.face_vertex_indices(2), &[4, 5, 6]);
    assert_eq!(crate_mesh.uv_channel_count(), 1);
    assert!(crate_mesh.has_normals());

    // Stored with a bottom-left origin
    let [u, v] = gltf_generator::QUAD_UVS[0];
    assert_eq!(
        crate_mesh.face_corner_uv(0, 0, 0),
        Some([u as f64, 1.0 - v as f64])
    );

    let lid = &objects[1];
    assert_eq!(lid.object_name(), "Lid");
    assert_eq!(lid.materials, vec!["Wood"]);
    assert!(!lid.has_normals());
}

/// Test submesh split and naming for glTF input
#[test]
fn test_gltf_to_mesh_xml() {
    let dir = tempdir().expect("Failed to create temp dir");
    let glb_path = dir.path().join("crate.glb");
    std::fs::write(&glb_path, gltf_generator::generate_crate_glb()).expect("Failed to write GLB");

    let objects = load_gltf(&glb_path).expect("Failed to load GLB");
    let mesh = export_objects(&objects, &ExportOptions::default()).expect("Export failed");

    let names: Vec<(&str, u32)> = mesh
        .submesh_names()
        .iter()
        .map(|n| (n.name.as_str(), n.index))
        .collect();
    assert_eq!(
        names,
        vec![("Crate.Wood", 0), ("Crate.Metal", 1), ("Lid.Wood", 2)]
    );

    for submesh in mesh.submeshes() {
        assert_eq!(submesh.faces(), &[[0, 1, 2], [0, 2, 3]]);
        assert_eq!(submesh.geometry().vertex_count(), 4);
    }

    // Flipped twice: the written UV matches the glTF source
    let vertex = &mesh.submeshes()[0].geometry().vertex_buffer.vertices()[0];
    let [u, v] = gltf_generator::QUAD_UVS[0];
    assert_eq!(vertex.texcoords, vec![[u as f64, v as f64]]);
    assert!(vertex.normal.is_some());
    assert!(!mesh.submeshes()[2].geometry().vertex_buffer.normals());
}

/// Test non-triangle primitives are rejected
#[test]
fn test_gltf_lines_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let glb_path = dir.path().join("lines.glb");
    std::fs::write(&glb_path, gltf_generator::generate_lines_glb()).expect("Failed to write GLB");

    let err = load_gltf(&glb_path).unwrap_err();
    assert!(format!("{:#}", err).contains("only triangle lists are supported"));
}

/// Test the binary accepts GLB input
#[test]
fn test_gltf_through_cli() {
    let dir = tempdir().expect("Failed to create temp dir");
    let glb_path = dir.path().join("crate.glb");
    let xml_path = dir.path().join("crate.mesh.xml");
    std::fs::write(&glb_path, gltf_generator::generate_crate_glb()).expect("Failed to write GLB");

    let status = Command::new(env!("CARGO_BIN_EXE_ogre-export"))
        .args([
            "mesh",
            glb_path.to_str().unwrap(),
            "-o",
            xml_path.to_str().unwrap(),
            "--object",
            "Lid",
        ])
        .status()
        .expect("Failed to run ogre-export");
    assert!(status.success(), "ogre-export mesh command failed");

    let xml = std::fs::read_to_string(&xml_path).expect("Failed to read mesh XML");
    assert!(xml.contains("<submeshname name=\"Wood\" index=\"0\"/>"));
    assert!(xml.contains("<texcoord u=\"0\" v=\"1\"/>"));
}
