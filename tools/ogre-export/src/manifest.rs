//! ogre.toml manifest parsing
//!
//! Describes one export: which objects to read from which files, and how the
//! resulting document is written.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::formats::XmlOptions;

/// ogre.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct ExportManifest {
    #[serde(default)]
    pub export: ExportSection,
    #[serde(default)]
    pub objects: Vec<ObjectEntry>,
}

/// Output settings
#[derive(Debug, Deserialize)]
pub struct ExportSection {
    /// Output path, relative to the manifest. Normalized to `*.mesh.xml`.
    /// Default: first object path with `.mesh.xml`
    pub output: Option<String>,

    /// Write `v` as `1 - v`.
    /// Default: true
    #[serde(default = "default_true")]
    pub flip_v: bool,

    /// Write vertex normals when the source has them.
    /// Default: true
    #[serde(default = "default_true")]
    pub normals: bool,

    /// Maximum number of objects this export may contain
    pub max_objects: Option<usize>,

    /// Converter run on the written file (e.g. "OgreXMLConverter")
    pub converter: Option<String>,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output: None,
            flip_v: true,
            normals: true,
            max_objects: None,
            converter: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// One source file and the objects taken from it
#[derive(Debug, Deserialize)]
pub struct ObjectEntry {
    pub path: String,

    /// Object names to export. Empty selects every object in the file.
    #[serde(default)]
    pub names: Vec<String>,
}

impl ExportManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse ogre.toml")
    }

    /// Validate manifest fields
    pub fn validate(&self) -> Result<()> {
        if self.objects.is_empty() {
            anyhow::bail!("No [[objects]] entries in ogre.toml");
        }

        if self.export.max_objects == Some(0) {
            anyhow::bail!("Invalid max_objects 0 in ogre.toml (must be at least 1)");
        }

        for (i, entry) in self.objects.iter().enumerate() {
            if entry.path.trim().is_empty() {
                anyhow::bail!("objects[{}] in ogre.toml has an empty path", i);
            }
        }

        if let Some(converter) = &self.export.converter {
            if converter.trim().is_empty() {
                anyhow::bail!("Empty converter in ogre.toml");
            }
        }

        Ok(())
    }

    /// Lowering options from the `[export]` section
    pub fn xml_options(&self) -> XmlOptions {
        XmlOptions {
            flip_v: self.export.flip_v,
            normals: self.export.normals,
        }
    }

    /// Source paths resolved against the manifest directory
    pub fn object_paths(&self, manifest_dir: &Path) -> Vec<PathBuf> {
        self.objects
            .iter()
            .map(|entry| manifest_dir.join(&entry.path))
            .collect()
    }

    /// Output path resolved against the manifest directory, if set
    pub fn output_path(&self, manifest_dir: &Path) -> Option<PathBuf> {
        self.export
            .output
            .as_ref()
            .map(|output| manifest_dir.join(output))
    }
}
