//! Mesh extraction entry points.
//!
//! Thin owners around [`Polygonizer`]: build one per query point, run it, and
//! hand back the collected triangles. Multi-region extraction fans out over the
//! rayon pool with one polygonizer per region, so no state is shared between
//! threads except the field.

use isomesh_core::{CountingSink, Point3, Polygonizer, PolygonizerConfig, ScalarField};
use rayon::prelude::*;

use crate::error::{IsomeshError, Result};
use crate::mesh::TriangleMesh;

/// Polygonize the lattice around `center` into an owned mesh.
///
/// # Errors
/// [`IsomeshError::InvalidConfig`] if `config` fails validation.
///
/// # Example
///
/// ```ignore
/// let sphere = |x: f32, y: f32, z: f32| 0.8 - (x * x + y * y + z * z).sqrt();
/// let mesh = extract_mesh(PolygonizerConfig::new(1.0, 0.1, 0.0), sphere, Point3::zero())?;
/// println!("Generated {} triangles", mesh.len());
/// ```
pub fn extract_mesh<F>(config: PolygonizerConfig, field: F, center: Point3) -> Result<TriangleMesh>
where
    F: ScalarField,
{
    let mut polygonizer = Polygonizer::new(config, field, TriangleMesh::new())?;
    let emitted = polygonizer.generate(center);
    log::debug!(
        "extracted {} triangles around ({}, {}, {}) over {}^3 cubes",
        emitted,
        center.x,
        center.y,
        center.z,
        config.cells_per_axis()
    );
    let (_, mesh) = polygonizer.into_parts();
    Ok(mesh)
}

/// Polygonize the lattice around each of `centers` in parallel.
///
/// Each region gets its own polygonizer and its own mesh. `result[i]` is the
/// mesh for `centers[i]`. Regions that overlap produce duplicate triangles;
/// nothing is merged.
///
/// # Errors
/// * [`IsomeshError::EmptyBatch`] if `centers` is empty
/// * [`IsomeshError::InvalidConfig`] if `config` fails validation
pub fn extract_regions<F>(
    config: PolygonizerConfig,
    field: &F,
    centers: &[Point3],
) -> Result<Vec<TriangleMesh>>
where
    F: ScalarField + Sync,
{
    if centers.is_empty() {
        return Err(IsomeshError::EmptyBatch);
    }
    config.validate()?;

    let meshes = centers
        .par_iter()
        .map(|&center| -> Result<TriangleMesh> {
            let sample = |x: f32, y: f32, z: f32| field.sample(x, y, z);
            let mut polygonizer = Polygonizer::new(config, sample, TriangleMesh::new())?;
            polygonizer.generate(center);
            let (_, mesh) = polygonizer.into_parts();
            Ok(mesh)
        })
        .collect::<Result<Vec<_>>>()?;

    let total: usize = meshes.iter().map(TriangleMesh::len).sum();
    log::info!(
        "extracted {} regions: triangles={} cells_per_axis={} step={}",
        meshes.len(),
        total,
        config.cells_per_axis(),
        config.cell_step,
    );
    Ok(meshes)
}

/// Count the triangles `extract_mesh` would produce, without storing them.
///
/// # Errors
/// [`IsomeshError::InvalidConfig`] if `config` fails validation.
pub fn count_triangles<F>(config: PolygonizerConfig, field: F, center: Point3) -> Result<usize>
where
    F: ScalarField,
{
    let mut polygonizer = Polygonizer::new(config, field, CountingSink::default())?;
    Ok(polygonizer.generate(center))
}
