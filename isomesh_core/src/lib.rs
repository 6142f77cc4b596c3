//! # isomesh_core
//!
//! Marching cubes isosurface extraction as a pure, allocation-free kernel.
//!
//! Given a scalar field `f(x, y, z)` and a threshold, a [`Polygonizer`] scans a
//! cubic lattice around a query point and streams the triangles approximating
//! the surface `f = threshold` to a callback. Nothing is buffered: each triangle
//! is handed out while its cube is being processed.
//!
//! ## Features
//!
//! - **no_std compatible**: Float math goes through `libm`
//! - **Streaming output**: Triangles go straight to a [`TriangleSink`]
//! - **No per-cube allocation**: 12 reusable vertex slots and one normal slot
//! - **Canonical tables**: The classic 256-configuration edge and triangle tables
//!
//! ## Feature Flags
//!
//! - `std` (default): Implements `std::error::Error` for [`IsomeshCoreError`]
//! - `serde`: `Serialize`/`Deserialize` for [`Vector3`] and [`PolygonizerConfig`]
//!
//! ## Modules
//!
//! - [`vector`]: `Vector3` value type (`Point3` alias)
//! - [`traits`]: Callback seams (`ScalarField`, `TriangleSink`)
//! - [`config`]: Polygonizer configuration and validation
//! - [`marching_cubes`]: Lookup tables, classification, edge interpolation
//! - [`polygonizer`]: The lattice walk
//! - [`error`]: Error types
//!
//! ## Usage
//!
//! ```ignore
//! use isomesh_core::prelude::*;
//!
//! let sphere = |x: f32, y: f32, z: f32| 1.0 - (x * x + y * y + z * z).sqrt();
//! let sink = |a: &Point3, b: &Point3, c: &Point3, normal: &Vector3| {
//!     // copy the triangle out; the references are reused for the next cube
//! };
//!
//! let mut polygonizer = Polygonizer::new(PolygonizerConfig::new(1.5, 0.1, 0.0), sphere, sink)?;
//! let emitted = polygonizer.generate(Point3::zero());
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod error;
pub mod marching_cubes;
pub mod polygonizer;
pub mod traits;
pub mod vector;

/// Prelude module for convenient imports.
///
/// Provides the most commonly used types and functions.
pub mod prelude {
    pub use crate::config::PolygonizerConfig;
    pub use crate::error::IsomeshCoreError;
    pub use crate::marching_cubes::{cube_index, cube_normal, interpolate_edge};
    pub use crate::polygonizer::{LatticeBounds, Polygonizer};
    pub use crate::traits::{CountingSink, NullSink, ScalarField, TriangleSink};
    pub use crate::vector::{Point3, Vector3};
}

// Re-export everything at crate root for convenience
pub use config::PolygonizerConfig;
pub use error::IsomeshCoreError;
pub use marching_cubes::{
    cube_index, cube_normal, interpolate_edge, triangle_count, INTERPOLATION_EPSILON,
};
pub use polygonizer::{LatticeBounds, Polygonizer, MAX_TRIANGLES_PER_CUBE};
pub use traits::{
    corner_from_index, index_from_corner, CountingSink, NullSink, ScalarField, TriangleSink,
};
pub use vector::{Point3, Vector3};

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_sphere_emits_triangles_near_surface() {
        let radius = 0.6;
        let sphere = |x: f32, y: f32, z: f32| radius - libm::sqrtf(x * x + y * y + z * z);
        let step = 0.1;
        let sink = |a: &Point3, b: &Point3, c: &Point3, _n: &Vector3| {
            for p in [a, b, c] {
                // Vertices lie on cube edges crossing the surface
                assert!((p.length() - radius).abs() < step);
            }
        };

        let config = PolygonizerConfig::new(1.0, step, 0.0);
        let mut polygonizer = Polygonizer::new(config, sphere, sink).unwrap();
        let emitted = polygonizer.generate(Point3::zero());

        assert!(emitted > 0, "Should generate triangles for sphere");
        assert!(emitted < 10000, "Too many triangles: {}", emitted);
    }

    #[test]
    fn test_generate_is_repeatable_on_one_instance() {
        let field = |x: f32, y: f32, z: f32| x * x + 2.0 * y * y + z * z;
        let config = PolygonizerConfig::new(1.0, 0.2, 0.5);
        let mut polygonizer = Polygonizer::new(config, field, CountingSink::default()).unwrap();

        let first = polygonizer.generate(Point3::zero());
        let second = polygonizer.generate(Point3::zero());
        assert_eq!(first, second);
        assert_eq!(polygonizer.sink().count, first + second);
    }
}
