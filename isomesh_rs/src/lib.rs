//! # isomesh_rs
//!
//! Isosurface extraction runtime built on [`isomesh_core`].
//!
//! The core polygonizer streams triangles through a callback and never
//! allocates. This crate adds the std-side conveniences around it:
//!
//! - **Owned meshes**: [`TriangleMesh`] copies every emitted triangle and normal
//! - **Statistics**: [`MeshStats`] for counts, surface area and bounds
//! - **Parallel regions**: [`extract_regions`] polygonizes many query points on
//!   the rayon pool, one polygonizer per region
//!
//! ## Quick Start
//!
//! ```ignore
//! use isomesh_rs::prelude::*;
//!
//! let sphere = |x: f32, y: f32, z: f32| 0.8 - (x * x + y * y + z * z).sqrt();
//! let config = PolygonizerConfig::new(1.0, 0.1, 0.0);
//!
//! let mesh = extract_mesh(config, sphere, Point3::zero())?;
//! let stats = MeshStats::from_mesh(&mesh);
//! println!("{} triangles, area {:.3}", stats.triangle_count, stats.surface_area);
//!
//! // Several regions at once
//! let centers = [Point3::zero(), Point3::new(2.0, 0.0, 0.0)];
//! let meshes = extract_regions(config, &sphere, &centers)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Forwards to `isomesh_core/serde`
//!
//! ## Logging
//!
//! Extraction reports through the `log` facade (`debug` per region, `info` per
//! batch). Install any logger, e.g. `env_logger`, to see it.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod extract;
mod mesh;

pub use error::{IsomeshError, Result};
pub use extract::{count_triangles, extract_mesh, extract_regions};
pub use mesh::{MeshStats, Triangle, TriangleMesh};

// Re-export isomesh_core types for convenience
pub use isomesh_core::{
    CountingSink, IsomeshCoreError, LatticeBounds, NullSink, Point3, Polygonizer,
    PolygonizerConfig, ScalarField, TriangleSink, Vector3,
};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use isomesh_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{IsomeshError, Result};
    pub use crate::extract::{count_triangles, extract_mesh, extract_regions};
    pub use crate::mesh::{MeshStats, Triangle, TriangleMesh};

    pub use isomesh_core::{Point3, Polygonizer, PolygonizerConfig, ScalarField, Vector3};
}
