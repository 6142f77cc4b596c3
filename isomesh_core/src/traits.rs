//! Callback seams of the polygonizer.
//!
//! The polygonizer reads the scalar field through [`ScalarField`] and hands
//! triangles out through [`TriangleSink`]. Both are blanket-implemented for
//! closures, so most callers never name the traits:
//!
//! ```ignore
//! let field = |x: f32, y: f32, z: f32| 1.0 - (x * x + y * y + z * z).sqrt();
//! let sink = |a: &Point3, b: &Point3, c: &Point3, n: &Vector3| { /* ... */ };
//! let mut polygonizer = Polygonizer::new(config, field, sink)?;
//! ```

use crate::marching_cubes::CORNER_OFFSETS;
use crate::vector::{Point3, Vector3};

/// A scalar field defined over all of ℝ³.
///
/// The polygonizer samples the field up to 8 times per lattice cube. For a
/// single `generate` call the field must be deterministic in its coordinates.
/// NaN samples classify as "not below threshold".
pub trait ScalarField {
    /// Sample the field at `(x, y, z)`.
    fn sample(&self, x: f32, y: f32, z: f32) -> f32;

    /// Sample the field at a point.
    #[inline]
    fn sample_at(&self, p: Point3) -> f32 {
        self.sample(p.x, p.y, p.z)
    }
}

impl<F> ScalarField for F
where
    F: Fn(f32, f32, f32) -> f32,
{
    #[inline]
    fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        self(x, y, z)
    }
}

/// Receiver for generated triangles.
///
/// `emit` is called once per triangle, vertices in table winding order
/// (counter-clockwise seen from the side the normal points to). The references
/// point into the polygonizer's per-cube workspace and are only valid for the
/// duration of the call; copy anything that must outlive it. All triangles of
/// one cube share the same `normal`.
pub trait TriangleSink {
    /// Receive one triangle and its cube normal.
    fn emit(&mut self, a: &Point3, b: &Point3, c: &Point3, normal: &Vector3);
}

impl<F> TriangleSink for F
where
    F: FnMut(&Point3, &Point3, &Point3, &Vector3),
{
    #[inline]
    fn emit(&mut self, a: &Point3, b: &Point3, c: &Point3, normal: &Vector3) {
        self(a, b, c, normal)
    }
}

/// Sink that only counts triangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingSink {
    /// Number of triangles received so far.
    pub count: usize,
}

impl TriangleSink for CountingSink {
    #[inline]
    fn emit(&mut self, _a: &Point3, _b: &Point3, _c: &Point3, _normal: &Vector3) {
        self.count += 1;
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TriangleSink for NullSink {
    #[inline]
    fn emit(&mut self, _a: &Point3, _b: &Point3, _c: &Point3, _normal: &Vector3) {}
}

/// Convert a corner index (0-7) to its `(x, y, z)` offset in the unit cube.
///
/// ```text
/// Corner:  0       1       2       3       4       5       6       7
/// Offset: (0,0,0) (1,0,0) (1,0,1) (0,0,1) (0,1,0) (1,1,0) (1,1,1) (0,1,1)
/// ```
///
/// Corners 0-3 form the low-y face, 4-7 the high-y face.
#[inline]
pub const fn corner_from_index(idx: usize) -> (u32, u32, u32) {
    CORNER_OFFSETS[idx & 7]
}

/// Convert a corner offset `(x, y, z)` to its corner index (0-7).
///
/// Inverse of [`corner_from_index`].
#[inline]
pub const fn index_from_corner(corner: (u32, u32, u32)) -> usize {
    match (corner.0 & 1, corner.1 & 1, corner.2 & 1) {
        (0, 0, 0) => 0,
        (1, 0, 0) => 1,
        (1, 0, 1) => 2,
        (0, 0, 1) => 3,
        (0, 1, 0) => 4,
        (1, 1, 0) => 5,
        (1, 1, 1) => 6,
        (0, 1, 1) => 7,
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_index_roundtrip() {
        for i in 0..8 {
            assert_eq!(index_from_corner(corner_from_index(i)), i);
        }
    }

    #[test]
    fn test_corner_from_index_reads_offset_table() {
        const FAR: (u32, u32, u32) = corner_from_index(6);
        assert_eq!(FAR, (1, 1, 1));
        for i in 0..8 {
            assert_eq!(corner_from_index(i), CORNER_OFFSETS[i]);
            // Only the low three bits select a corner
            assert_eq!(corner_from_index(i + 8), corner_from_index(i));
        }
    }

    #[test]
    fn test_bottom_and_top_faces() {
        for i in 0..4 {
            assert_eq!(corner_from_index(i).1, 0);
            assert_eq!(corner_from_index(i + 4).1, 1);
            // Top corner sits directly above its bottom counterpart
            let (bx, _, bz) = corner_from_index(i);
            let (tx, _, tz) = corner_from_index(i + 4);
            assert_eq!((bx, bz), (tx, tz));
        }
    }

    #[test]
    fn test_closure_field() {
        let field = |x: f32, y: f32, z: f32| x + 2.0 * y + 3.0 * z;
        assert_eq!(field.sample(1.0, 1.0, 1.0), 6.0);
        assert_eq!(field.sample_at(Point3::new(1.0, 0.0, 0.0)), 1.0);
    }

    #[test]
    fn test_closure_sink_and_counting_sink() {
        let p = Point3::zero();
        let n = Vector3::new(0.0, 1.0, 0.0);

        let mut seen = 0;
        {
            let mut sink = |_: &Point3, _: &Point3, _: &Point3, normal: &Vector3| {
                assert_eq!(*normal, Vector3::new(0.0, 1.0, 0.0));
                seen += 1;
            };
            sink.emit(&p, &p, &p, &n);
            sink.emit(&p, &p, &p, &n);
        }
        assert_eq!(seen, 2);

        let mut counter = CountingSink::default();
        counter.emit(&p, &p, &p, &n);
        assert_eq!(counter.count, 1);

        NullSink.emit(&p, &p, &p, &n);
    }
}
