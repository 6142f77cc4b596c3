//! Streaming isosurface polygonizer.
//!
//! A [`Polygonizer`] walks a cubic lattice of sampling cubes centred on a query
//! point, classifies every cube against the threshold and streams the resulting
//! triangles to a [`TriangleSink`]. No mesh is built: each triangle is handed
//! out as soon as its cube is processed.
//!
//! # Workspace
//!
//! The polygonizer owns 12 vertex slots (one per cube edge) and one normal slot.
//! They are overwritten for every cube, so the references passed to
//! [`TriangleSink::emit`] are only valid until the next cube is processed. No
//! allocation happens during [`Polygonizer::generate`].
//!
//! # Threading
//!
//! `generate` takes `&mut self`, so one instance serves one call at a time.
//! Run independent instances to polygonize from several threads.
//!
//! # Example
//!
//! ```ignore
//! use isomesh_core::{Point3, Polygonizer, PolygonizerConfig, Vector3};
//!
//! let sphere = |x: f32, y: f32, z: f32| 0.8 - (x * x + y * y + z * z).sqrt();
//! let mut count = 0;
//! let sink = |_a: &Point3, _b: &Point3, _c: &Point3, _n: &Vector3| count += 1;
//!
//! let config = PolygonizerConfig::new(1.0, 0.1, 0.0);
//! let mut polygonizer = Polygonizer::new(config, sphere, sink)?;
//! polygonizer.generate(Point3::zero());
//! ```

use crate::config::PolygonizerConfig;
use crate::error::IsomeshCoreError;
use crate::marching_cubes::{
    interpolate_edge, write_cube_normal, CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE,
};
use crate::traits::{ScalarField, TriangleSink};
use crate::vector::{Point3, Vector3};

/// Maximum number of triangles a single cube can produce.
pub const MAX_TRIANGLES_PER_CUBE: usize = 5;

/// The lattice of cubes scanned by one `generate` call.
///
/// Cube `(i, j, k)` spans `origin + (i, j, k) * step` to
/// `origin + (i + 1, j + 1, k + 1) * step`, for indices in `0..cells_per_axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeBounds {
    /// Minimum corner of the first cube.
    pub origin: Point3,
    /// Cube edge length.
    pub step: f32,
    /// Number of cubes along each axis.
    pub cells_per_axis: usize,
}

impl LatticeBounds {
    /// Lattice for `config` around `center`.
    ///
    /// The origin is snapped to a multiple of the step at or below `center`
    /// and then moved down by the radius on every axis. The lattice reaches
    /// at least `center + radius` on every axis.
    pub fn around(config: &PolygonizerConfig, center: Point3) -> Self {
        let step = config.cell_step;
        let radius = config.cell_radius;
        let snap = |c: f32| {
            let mut k = libm::floorf(c / step);
            // c / step can round up onto the next multiple
            if k * step > c {
                k -= 1.0;
            }
            k * step - radius
        };
        let mut lattice = Self {
            origin: Point3::new(snap(center.x), snap(center.y), snap(center.z)),
            step,
            cells_per_axis: config.cells_per_axis(),
        };
        let far = center + Point3::splat(radius);
        let hi = lattice.max();
        if hi.x < far.x || hi.y < far.y || hi.z < far.z {
            lattice.cells_per_axis = lattice.cells_per_axis.saturating_add(1);
        }
        lattice
    }

    /// Lattice coordinate `index` steps from `start`.
    ///
    /// Computed from the index rather than accumulated, so a corner shared by
    /// two cubes gets bit-identical coordinates in both.
    #[inline]
    fn coord(&self, start: f32, index: usize) -> f32 {
        start + index as f32 * self.step
    }

    /// Minimum corner of the scanned region.
    #[inline]
    pub fn min(&self) -> Point3 {
        self.origin
    }

    /// Maximum corner of the scanned region.
    #[inline]
    pub fn max(&self) -> Point3 {
        let n = self.cells_per_axis;
        Point3::new(
            self.coord(self.origin.x, n),
            self.coord(self.origin.y, n),
            self.coord(self.origin.z, n),
        )
    }

    /// Minimum corner of cube `(i, j, k)`.
    #[inline]
    pub fn cube_origin(&self, i: usize, j: usize, k: usize) -> Point3 {
        Point3::new(
            self.coord(self.origin.x, i),
            self.coord(self.origin.y, j),
            self.coord(self.origin.z, k),
        )
    }

    /// Total number of cubes visited, or `None` if it overflows `usize`.
    #[inline]
    pub fn cube_count(&self) -> Option<usize> {
        let n = self.cells_per_axis;
        n.checked_mul(n)?.checked_mul(n)
    }

    /// True if `p` lies inside the scanned region (boundary included).
    #[inline]
    pub fn contains(&self, p: Point3) -> bool {
        let (lo, hi) = (self.min(), self.max());
        p.x >= lo.x && p.x <= hi.x && p.y >= lo.y && p.y <= hi.y && p.z >= lo.z && p.z <= hi.z
    }
}

/// Marching cubes polygonizer over a caller-supplied scalar field.
///
/// Generic over the field `F` and the triangle sink `S`; both are usually
/// closures. Configuration is fixed at construction.
pub struct Polygonizer<F, S> {
    config: PolygonizerConfig,
    field: F,
    sink: S,
    /// Edge crossing points, indexed by edge. Valid only until the next cube.
    vertices: [Point3; 12],
    /// Normal of the current cube. Valid only until the next cube.
    normal: Vector3,
}

impl<F, S> Polygonizer<F, S>
where
    F: ScalarField,
    S: TriangleSink,
{
    /// Create a polygonizer.
    ///
    /// # Arguments
    /// * `config` - Lattice radius, cube step and threshold
    /// * `field` - Scalar field to sample
    /// * `sink` - Receiver for generated triangles
    ///
    /// # Errors
    /// Returns the first failed precondition from [`PolygonizerConfig::validate`].
    pub fn new(config: PolygonizerConfig, field: F, sink: S) -> Result<Self, IsomeshCoreError> {
        config.validate()?;
        Ok(Self {
            config,
            field,
            sink,
            vertices: [Point3::zero(); 12],
            normal: Vector3::zero(),
        })
    }

    /// The configuration this polygonizer was built with.
    #[inline]
    pub fn config(&self) -> &PolygonizerConfig {
        &self.config
    }

    /// The scalar field.
    #[inline]
    pub fn field(&self) -> &F {
        &self.field
    }

    /// The triangle sink.
    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the triangle sink, e.g. to drain collected triangles
    /// between calls.
    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the polygonizer and return the field and the sink.
    #[inline]
    pub fn into_parts(self) -> (F, S) {
        (self.field, self.sink)
    }

    /// The lattice a call to `generate(center)` would scan.
    #[inline]
    pub fn lattice(&self, center: Point3) -> LatticeBounds {
        LatticeBounds::around(&self.config, center)
    }

    /// Polygonize the lattice around `center`.
    ///
    /// Visits every cube of [`Polygonizer::lattice`] in x-major, then y, then z
    /// order and emits each cube's triangles to the sink before moving on. The
    /// output is a deterministic function of the field, the configuration and
    /// `center`.
    ///
    /// # Returns
    /// The number of triangles emitted by this call.
    pub fn generate(&mut self, center: Point3) -> usize {
        let lattice = self.lattice(center);
        let n = lattice.cells_per_axis;
        let origin = lattice.origin;

        let mut emitted = 0;
        for i in 0..n {
            let xs = [lattice.coord(origin.x, i), lattice.coord(origin.x, i + 1)];
            for j in 0..n {
                let ys = [lattice.coord(origin.y, j), lattice.coord(origin.y, j + 1)];
                for k in 0..n {
                    let zs = [lattice.coord(origin.z, k), lattice.coord(origin.z, k + 1)];
                    emitted += self.polygonize_cube(xs, ys, zs);
                }
            }
        }
        emitted
    }

    /// Polygonize the single cube whose minimum corner is `min_corner`.
    ///
    /// # Returns
    /// The number of triangles emitted (0 to 5).
    pub fn generate_cube(&mut self, min_corner: Point3) -> usize {
        let step = self.config.cell_step;
        self.polygonize_cube(
            [min_corner.x, min_corner.x + step],
            [min_corner.y, min_corner.y + step],
            [min_corner.z, min_corner.z + step],
        )
    }

    /// Classify one cube and emit its triangles.
    ///
    /// `xs`, `ys` and `zs` hold the low and high coordinate along each axis.
    fn polygonize_cube(&mut self, xs: [f32; 2], ys: [f32; 2], zs: [f32; 2]) -> usize {
        let threshold = self.config.threshold;

        let mut corners = [Point3::zero(); 8];
        let mut values = [0.0f32; 8];
        let mut config = 0usize;
        for (i, &(ox, oy, oz)) in CORNER_OFFSETS.iter().enumerate() {
            let p = Point3::new(xs[ox as usize], ys[oy as usize], zs[oz as usize]);
            let value = self.field.sample(p.x, p.y, p.z);
            if value < threshold {
                config |= 1 << i;
            }
            corners[i] = p;
            values[i] = value;
        }

        let edge_mask = EDGE_TABLE[config];
        if edge_mask == 0 {
            return 0;
        }

        for (edge, &(a, b)) in EDGE_VERTICES.iter().enumerate() {
            if edge_mask & (1 << edge) != 0 {
                self.vertices[edge] =
                    interpolate_edge(corners[a], corners[b], values[a], values[b], threshold);
            }
        }

        write_cube_normal(&mut self.normal, &values);

        let mut emitted = 0;
        for tri in TRI_TABLE[config]
            .chunks_exact(3)
            .take(MAX_TRIANGLES_PER_CUBE)
        {
            if tri[0] == -1 {
                break;
            }
            self.sink.emit(
                &self.vertices[tri[0] as usize],
                &self.vertices[tri[1] as usize],
                &self.vertices[tri[2] as usize],
                &self.normal,
            );
            emitted += 1;
        }
        emitted
    }
}

impl<F, S> core::fmt::Debug for Polygonizer<F, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Polygonizer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::CountingSink;

    /// Horizontal plane at y = 0.1, increasing upwards.
    fn plane(_x: f32, y: f32, _z: f32) -> f32 {
        y - 0.1
    }

    #[test]
    fn test_rejects_invalid_config() {
        let field = |_: f32, _: f32, _: f32| 0.0f32;
        let bad_step = PolygonizerConfig::new(1.0, 0.0, 0.0);
        let result = Polygonizer::new(bad_step, field, CountingSink::default());
        assert!(matches!(result, Err(IsomeshCoreError::NonPositiveStep { .. })));

        let bad_radius = PolygonizerConfig::new(-1.0, 0.1, 0.0);
        let result = Polygonizer::new(bad_radius, field, CountingSink::default());
        assert!(matches!(result, Err(IsomeshCoreError::NonPositiveRadius { .. })));
    }

    #[test]
    fn test_lattice_snapping() {
        let config = PolygonizerConfig::new(1.0, 0.5, 0.0);
        let lattice = LatticeBounds::around(&config, Point3::new(0.7, -0.2, 2.0));
        assert_eq!(lattice.origin, Point3::new(-0.5, -1.5, 1.0));
        assert_eq!(lattice.cells_per_axis, 5);
        assert_eq!(lattice.max(), Point3::new(2.0, 1.0, 3.5));
        assert_eq!(lattice.cube_count(), Some(125));
    }

    #[test]
    fn test_lattice_contains_query_region() {
        let config = PolygonizerConfig::new(0.4, 1.0, 0.0);
        let center = Point3::new(0.99, 0.0, -0.5);
        let lattice = LatticeBounds::around(&config, center);
        assert!(lattice.contains(center - Point3::splat(0.4)));
        assert!(lattice.contains(center + Point3::splat(0.4)));
    }

    #[test]
    fn test_lattice_covers_fractional_radius() {
        let config = PolygonizerConfig::new(1000.05, 1.0, 0.0);
        let center = Point3::splat(0.99);
        let lattice = LatticeBounds::around(&config, center);
        assert!(lattice.contains(center - Point3::splat(1000.05)));
        assert!(lattice.contains(center + Point3::splat(1000.05)));
        assert!(lattice.max().x >= 1001.04);
    }

    #[test]
    fn test_lattice_snaps_below_center() {
        // Just under 9 steps: the quotient rounds up to 9.0
        let step = 0.1f32;
        let c = f32::from_bits((9.0f32 * step).to_bits() - 1);
        let config = PolygonizerConfig::new(0.5, step, 0.0);
        let center = Point3::new(c, c, c);
        let lattice = LatticeBounds::around(&config, center);

        assert!(lattice.origin.x <= c - 0.5);
        assert!(lattice.contains(center - Point3::splat(0.5)));
        assert!(lattice.contains(center + Point3::splat(0.5)));
    }

    #[test]
    fn test_cube_count_overflow() {
        let lattice = LatticeBounds {
            origin: Point3::zero(),
            step: 1.0,
            cells_per_axis: usize::MAX / 2,
        };
        assert_eq!(lattice.cube_count(), None);
    }

    #[test]
    fn test_rejects_unbounded_lattice() {
        let field = |_: f32, _: f32, _: f32| 0.0f32;
        let huge = PolygonizerConfig::new(1e30, 1e-30, 0.0);
        let result = Polygonizer::new(huge, field, CountingSink::default());
        assert!(matches!(result, Err(IsomeshCoreError::LatticeTooLarge { .. })));
    }

    #[test]
    fn test_uniform_field_emits_nothing() {
        let mut above = Polygonizer::new(
            PolygonizerConfig::new(0.5, 0.25, 0.0),
            |_: f32, _: f32, _: f32| 1.0f32,
            CountingSink::default(),
        )
        .unwrap();
        assert_eq!(above.generate(Point3::zero()), 0);

        let mut below = Polygonizer::new(
            PolygonizerConfig::new(0.5, 0.25, 0.0),
            |_: f32, _: f32, _: f32| -1.0f32,
            CountingSink::default(),
        )
        .unwrap();
        assert_eq!(below.generate(Point3::zero()), 0);
        assert_eq!(below.sink().count, 0);
    }

    #[test]
    fn test_plane_emits_two_triangles_per_crossed_cube() {
        // Only the layer of cubes spanning y in [0, 0.5] is crossed
        let config = PolygonizerConfig::new(1.0, 0.5, 0.0);
        let mut polygonizer = Polygonizer::new(config, plane, CountingSink::default()).unwrap();

        let emitted = polygonizer.generate(Point3::zero());
        let n = polygonizer.lattice(Point3::zero()).cells_per_axis;
        assert_eq!(emitted, 2 * n * n);
        assert_eq!(polygonizer.sink().count, emitted);
    }

    #[test]
    fn test_plane_normals_and_heights() {
        let config = PolygonizerConfig::new(1.0, 0.5, 0.0);
        let sink = |a: &Point3, b: &Point3, c: &Point3, n: &Vector3| {
            for p in [a, b, c] {
                assert!((p.y - 0.1).abs() < 1e-5, "vertex off plane: {:?}", p);
            }
            assert!((*n - Vector3::new(0.0, 1.0, 0.0)).length() < 1e-5);
            // Winding agrees with the normal
            let face = (*b - *a).cross(*c - *a);
            assert!(face.dot(*n) > 0.0);
        };
        let mut polygonizer = Polygonizer::new(config, plane, sink).unwrap();
        assert!(polygonizer.generate(Point3::zero()) > 0);
    }

    #[test]
    fn test_generate_cube_single_corner() {
        // Only corner 0 of the unit cube at the origin is below the threshold
        let field = |x: f32, y: f32, z: f32| x + y + z;
        let mut tris = 0;
        let mut polygonizer = Polygonizer::new(
            PolygonizerConfig::new(1.0, 1.0, 0.5),
            field,
            |a: &Point3, b: &Point3, c: &Point3, n: &Vector3| {
                tris += 1;
                let expected = [
                    Point3::new(0.5, 0.0, 0.0),
                    Point3::new(0.0, 0.5, 0.0),
                    Point3::new(0.0, 0.0, 0.5),
                ];
                for (p, e) in [a, b, c].into_iter().zip(expected) {
                    assert!((*p - e).length() < 1e-6, "{:?} != {:?}", p, e);
                }
                let dir = Vector3::splat(1.0).normalized();
                assert!((*n - dir).length() < 1e-6);
            },
        )
        .unwrap();

        assert_eq!(polygonizer.generate_cube(Point3::zero()), 1);
        drop(polygonizer);
        assert_eq!(tris, 1);
    }

    #[test]
    fn test_into_parts_returns_sink() {
        let field = |x: f32, y: f32, z: f32| x * x + y * y + z * z;
        let config = PolygonizerConfig::new(1.0, 0.25, 0.25);
        let mut polygonizer = Polygonizer::new(config, field, CountingSink::default()).unwrap();
        let emitted = polygonizer.generate(Point3::zero());
        let (_, sink) = polygonizer.into_parts();
        assert!(emitted > 0);
        assert_eq!(sink.count, emitted);
    }
}
