//! Export pipeline
//!
//! load -> select objects -> assemble -> lower -> write `.mesh.xml`
//! (-> optional external converter).

use anyhow::{bail, Context, Result};
use ogre_xml::{to_xml_string, MeshXml};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::formats::{build_mesh_xml, XmlOptions};
use crate::import::load_objects;
use crate::manifest::ExportManifest;
use crate::mesh::assemble;
use crate::source::{GeometrySource, SourceMesh};

/// Output file suffix
pub const MESH_XML_EXT: &str = ".mesh.xml";

/// Settings for one export
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub xml: XmlOptions,
    /// Maximum number of objects the export may contain (`None` for no limit)
    pub max_objects: Option<usize>,
    /// Program run with the written file as its only argument
    pub converter: Option<String>,
}

/// Keep the objects whose names are listed, in file order.
///
/// An empty `names` keeps everything. Every listed name must exist.
pub fn select_objects(objects: Vec<SourceMesh>, names: &[String]) -> Result<Vec<SourceMesh>> {
    if names.is_empty() {
        return Ok(objects);
    }

    for name in names {
        if !objects.iter().any(|object| &object.name == name) {
            let available: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
            bail!(
                "Object '{}' not found (available: {})",
                name,
                available.join(", ")
            );
        }
    }

    Ok(objects
        .into_iter()
        .filter(|object| names.contains(&object.name))
        .collect())
}

/// Load the objects of every input, filtered by `names`
pub fn load_selection(inputs: &[PathBuf], names: &[String]) -> Result<Vec<SourceMesh>> {
    let mut selected = Vec::new();
    let mut found: Vec<&String> = Vec::new();

    for input in inputs {
        let objects = load_objects(input)?;
        if names.is_empty() {
            selected.extend(objects);
            continue;
        }

        for object in objects {
            if let Some(name) = names.iter().find(|name| **name == object.name) {
                found.push(name);
                selected.push(object);
            }
        }
    }

    if let Some(missing) = names.iter().find(|name| !found.contains(name)) {
        bail!("Object '{}' not found in {:?}", missing, inputs);
    }

    Ok(selected)
}

/// Convert objects into a document tree
pub fn export_objects(objects: &[SourceMesh], options: &ExportOptions) -> Result<MeshXml> {
    let sources: Vec<&dyn GeometrySource> = objects
        .iter()
        .map(|object| object as &dyn GeometrySource)
        .collect();

    let document = assemble(&sources, options.max_objects)?;
    tracing::info!(
        "Assembled {} object(s): {} submesh(es), {} vertices, {} triangles",
        objects.len(),
        document.submeshes.len(),
        document.vertex_count(),
        document.triangle_count()
    );

    Ok(build_mesh_xml(&document, &sources, &options.xml)?)
}

/// Serialize and write a document. Nothing is created if serialization fails.
pub fn write_mesh_file(path: &Path, mesh: &MeshXml) -> Result<()> {
    let xml = to_xml_string(mesh).context("Failed to serialize mesh XML")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    std::fs::write(path, xml).with_context(|| format!("Failed to write output: {:?}", path))?;
    Ok(())
}

/// Full pipeline for already selected objects
pub fn export_to_file(objects: &[SourceMesh], output: &Path, options: &ExportOptions) -> Result<()> {
    let mesh = export_objects(objects, options)?;
    write_mesh_file(output, &mesh)?;
    tracing::info!("Wrote {:?}", output);

    if let Some(converter) = &options.converter {
        run_converter(converter, output)?;
    }
    Ok(())
}

/// Export everything a manifest describes. `output` overrides the manifest's.
pub fn build_manifest(
    manifest: &ExportManifest,
    manifest_dir: &Path,
    output: Option<&Path>,
) -> Result<PathBuf> {
    manifest.validate()?;

    let mut objects = Vec::new();
    for (entry, path) in manifest.objects.iter().zip(manifest.object_paths(manifest_dir)) {
        let loaded = load_objects(&path)?;
        objects.extend(
            select_objects(loaded, &entry.names).with_context(|| format!("In {:?}", path))?,
        );
    }

    let output = match output {
        Some(path) => normalize_output_path(path),
        None => match manifest.output_path(manifest_dir) {
            Some(path) => normalize_output_path(&path),
            None => default_output_path(&manifest_dir.join(&manifest.objects[0].path)),
        },
    };

    let options = ExportOptions {
        xml: manifest.xml_options(),
        max_objects: manifest.export.max_objects,
        converter: manifest.export.converter.clone(),
    };
    export_to_file(&objects, &output, &options)?;
    Ok(output)
}

/// Force the `.mesh.xml` suffix, collapsing a doubled `.mesh.mesh.xml`
pub fn normalize_output_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let lower = raw.to_lowercase();

    if lower.ends_with(".mesh.mesh.xml") {
        let stem = &raw[..raw.len() - ".mesh.mesh.xml".len()];
        PathBuf::from(format!("{}{}", stem, MESH_XML_EXT))
    } else if lower.ends_with(MESH_XML_EXT) {
        path.to_path_buf()
    } else {
        PathBuf::from(format!("{}{}", raw, MESH_XML_EXT))
    }
}

/// `model.obj` -> `model.mesh.xml`
pub fn default_output_path(input: &Path) -> PathBuf {
    normalize_output_path(&input.with_extension(""))
}

/// Run an external converter (e.g. OgreXMLConverter) on a written file
pub fn run_converter(converter: &str, path: &Path) -> Result<()> {
    tracing::info!("Running {} on {:?}", converter, path);
    let status = Command::new(converter)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to run converter: {}", converter))?;

    if !status.success() {
        bail!("{} failed on {:?} ({})", converter, path, status);
    }
    Ok(())
}
