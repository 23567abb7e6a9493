//! Test asset generation
//!
//! Writes small OBJ files and manifests for integration testing.

use std::fs;
use std::io::Write;
use std::path::Path;

/// Single textured quad with normals, one material
pub fn generate_quad_obj(path: &Path) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;

    writeln!(file, "# Unit quad in the XY plane")?;
    writeln!(file, "o Plane")?;
    writeln!(file, "v 0 0 0")?;
    writeln!(file, "v 1 0 0")?;
    writeln!(file, "v 1 1 0")?;
    writeln!(file, "v 0 1 0")?;
    writeln!(file, "vt 0 0")?;
    writeln!(file, "vt 1 0")?;
    writeln!(file, "vt 1 1")?;
    writeln!(file, "vt 0 1")?;
    writeln!(file, "vn 0 0 1")?;
    writeln!(file, "usemtl Stone")?;
    writeln!(file, "f 1/1/1 2/2/1 3/3/1 4/4/1")?;

    Ok(())
}

/// Two quads sharing an edge whose UVs differ on each side
///
/// Welds to 8 vertices; without the seam it would be 6.
pub fn generate_seam_obj(path: &Path) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;

    writeln!(file, "o Strip")?;
    for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)] {
        writeln!(file, "v {} {} 0", x, y)?;
    }
    writeln!(file, "vt 0 0")?;
    writeln!(file, "vt 1 0")?;
    writeln!(file, "vt 1 1")?;
    writeln!(file, "vt 0 1")?;
    writeln!(file, "usemtl Paint")?;
    // Shared edge is v2-v5: u = 1 on the left quad, u = 0 on the right one
    writeln!(file, "f 1/1 2/2 5/3 4/4")?;
    writeln!(file, "f 2/1 3/2 6/3 5/4")?;

    Ok(())
}

/// Two objects: a two-material box lid and a single-material handle
pub fn generate_multi_object_obj(path: &Path) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;

    for (x, y, z) in [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (1.0, 1.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (1.0, 0.0, 1.0),
    ] {
        writeln!(file, "v {} {} {}", x, y, z)?;
    }
    writeln!(file, "vt 0 0")?;
    writeln!(file, "vt 1 0")?;
    writeln!(file, "vt 1 1")?;

    writeln!(file, "o Lid")?;
    writeln!(file, "usemtl Wood")?;
    writeln!(file, "f 1/1 2/2 3/3")?;
    writeln!(file, "usemtl Brass")?;
    writeln!(file, "f 1/1 3/2 4/3")?;
    writeln!(file, "usemtl Wood")?;
    writeln!(file, "f 1/1 4/2 5/3")?;

    writeln!(file, "o Handle")?;
    writeln!(file, "usemtl Brass")?;
    writeln!(file, "f 1/1 2/2 6/3 5/1")?;

    Ok(())
}

/// A single pentagon (cannot be converted)
pub fn generate_pentagon_obj(path: &Path) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;

    writeln!(file, "o Pentagon")?;
    writeln!(file, "v 0 0 0")?;
    writeln!(file, "v 1 0 0")?;
    writeln!(file, "v 1.5 1 0")?;
    writeln!(file, "v 0.5 2 0")?;
    writeln!(file, "v -0.5 1 0")?;
    writeln!(file, "usemtl Paint")?;
    writeln!(file, "f 1 2 3 4 5")?;

    Ok(())
}

/// Manifest exporting `Lid` from a multi-object file
pub fn generate_manifest(path: &Path, object_path: &str, output: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;

    writeln!(file, "[export]")?;
    writeln!(file, "output = \"{}\"", output)?;
    writeln!(file, "flip_v = false")?;
    writeln!(file, "max_objects = 1")?;
    writeln!(file)?;
    writeln!(file, "[[objects]]")?;
    writeln!(file, "path = \"{}\"", object_path)?;
    writeln!(file, "names = [\"Lid\"]")?;

    Ok(())
}
