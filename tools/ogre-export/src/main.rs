//! ogre-export - OGRE XML mesh export tool
//!
//! Converts OBJ/glTF/GLB objects into `.mesh.xml` documents, one submesh per
//! material.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

// Use modules from library
use ogre_export::export::{self, ExportOptions};
use ogre_export::import;
use ogre_export::manifest::ExportManifest;
use ogre_export::source::GeometrySource;
use ogre_export::XmlOptions;

#[derive(Parser)]
#[command(name = "ogre-export")]
#[command(about = "OGRE XML mesh export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export objects from one or more mesh files
    Mesh {
        /// Input mesh files (OBJ/glTF/GLB)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output .mesh.xml file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Object to export (repeatable, default: all objects)
        #[arg(long = "object")]
        objects: Vec<String>,

        /// Fail if more than this many objects are selected
        #[arg(long)]
        max_objects: Option<usize>,

        /// Do not write vertex normals
        #[arg(long)]
        no_normals: bool,

        /// Write texture coordinates unchanged instead of `1 - v`
        #[arg(long)]
        no_flip_v: bool,

        /// Converter to run on the written file (e.g. OgreXMLConverter)
        #[arg(long)]
        converter: Option<String>,
    },

    /// Export from a manifest file
    Build {
        /// Path to ogre.toml manifest
        #[arg(default_value = "ogre.toml")]
        manifest: PathBuf,

        /// Output file (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without exporting
    Check {
        /// Path to ogre.toml manifest
        #[arg(default_value = "ogre.toml")]
        manifest: PathBuf,
    },

    /// List objects, materials and UV channels of a mesh file
    List {
        /// Input mesh file (OBJ/glTF/GLB)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mesh {
            inputs,
            output,
            objects,
            max_objects,
            no_normals,
            no_flip_v,
            converter,
        } => {
            let output = match output {
                Some(path) => export::normalize_output_path(&path),
                None => export::default_output_path(&inputs[0]),
            };
            tracing::info!("Converting {:?} -> {:?}", inputs, output);

            let selected = export::load_selection(&inputs, &objects)?;
            let options = ExportOptions {
                xml: XmlOptions {
                    flip_v: !no_flip_v,
                    normals: !no_normals,
                },
                max_objects,
                converter,
            };
            export::export_to_file(&selected, &output, &options)?;
            tracing::info!("Done!");
        }

        Commands::Build { manifest, output } => {
            tracing::info!("Building mesh from {:?}", manifest);
            let config = ExportManifest::load(&manifest)?;
            let output = export::build_manifest(&config, manifest_dir(&manifest), output.as_deref())?;
            tracing::info!("Build complete: {:?}", output);
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = ExportManifest::load(&manifest)?;
            config.validate()?;
            for path in config.object_paths(manifest_dir(&manifest)) {
                if !path.exists() {
                    anyhow::bail!("Object file not found: {:?}", path);
                }
            }
            tracing::info!("Manifest is valid!");
        }

        Commands::List { input } => list_objects(&input)?,
    }

    Ok(())
}

fn manifest_dir(manifest: &Path) -> &Path {
    manifest.parent().unwrap_or(Path::new("."))
}

fn list_objects(input: &Path) -> Result<()> {
    let objects =
        import::load_objects(input).with_context(|| format!("Failed to list {:?}", input))?;

    tracing::info!("Objects in {:?}:", input);
    for (i, object) in objects.iter().enumerate() {
        tracing::info!(
            "  [{}] '{}': {} vertices, {} faces, {} UV channel(s), normals: {}",
            i,
            object.object_name(),
            object.vertex_count(),
            object.face_count(),
            object.uv_channel_count(),
            object.has_normals()
        );
        for material in &object.materials {
            tracing::info!("      material '{}'", material);
        }
    }

    Ok(())
}
