//! Structural checks every generated mesh must pass.

use anyhow::{bail, ensure, Result};
use vrwidgets_ui3d::Mesh;

/// Verify the invariants shared by all builders.
///
/// - positions, normals and uvs have the same length
/// - the index count is a multiple of three and every index is in range
/// - every coordinate is finite and every normal has unit length
/// - no non-degenerate triangle is wound against its vertex normals
pub fn check_mesh(mesh: &Mesh) -> Result<()> {
    let count = mesh.vertex_count();
    ensure!(
        mesh.normals().len() == count && mesh.uvs().len() == count,
        "attribute arrays differ: {} positions, {} normals, {} uvs",
        count,
        mesh.normals().len(),
        mesh.uvs().len()
    );
    ensure!(
        mesh.indices().len() % 3 == 0,
        "index count {} is not a multiple of 3",
        mesh.indices().len()
    );
    if let Some(bad) = mesh.indices().iter().find(|&&i| i as usize >= count) {
        bail!("index {bad} out of range for {count} vertices");
    }
    if let Some(p) = mesh.positions().iter().find(|p| !p.is_finite()) {
        bail!("non-finite position {p:?}");
    }
    if let Some(n) = mesh
        .normals()
        .iter()
        .find(|n| (n.length() - 1.0).abs() > 1e-3)
    {
        bail!("normal {n:?} is not unit length");
    }

    let positions = mesh.positions();
    let normals = mesh.normals();
    for (t, [a, b, c]) in mesh.triangles().enumerate() {
        let (a, b, c) = (a as usize, b as usize, c as usize);
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        if face.length_squared() <= 1e-14 {
            continue;
        }
        let facing = normals[a] + normals[b] + normals[c];
        if face.dot(facing) < -1e-6 * face.length() {
            bail!("triangle {t} ({a}, {b}, {c}) is inverted");
        }
    }
    Ok(())
}

/// Panic with the failing invariant if `mesh` is malformed.
#[track_caller]
pub fn assert_mesh_well_formed(mesh: &Mesh) {
    if let Err(err) = check_mesh(mesh) {
        panic!("malformed mesh: {err}");
    }
}
