//! Per-cube marching cubes primitives.
//!
//! Classification, edge interpolation and the per-cube normal. The lattice walk
//! that drives them lives in [`crate::polygonizer`].

use crate::vector::{Point3, Vector3};

use super::tables::TRI_TABLE;

/// Tolerance used by [`interpolate_edge`] for corner snapping and flat edges.
pub const INTERPOLATION_EPSILON: f32 = 1e-5;

/// Locate the point where the field crosses `threshold` on the edge `a`-`b`.
///
/// The checks run in this order:
///
/// 1. `fa` within epsilon of the threshold: the crossing is exactly `a`
/// 2. `fb` within epsilon of the threshold: the crossing is exactly `b`
/// 3. `fa` and `fb` within epsilon of each other: flat edge, the crossing is `a`
/// 4. otherwise `a + mu * (b - a)` with `mu = (threshold - fa) / (fb - fa)`
///
/// # Arguments
/// * `a` - First edge endpoint
/// * `b` - Second edge endpoint
/// * `fa` - Field value at `a`
/// * `fb` - Field value at `b`
/// * `threshold` - Isosurface level
#[inline]
pub fn interpolate_edge(a: Point3, b: Point3, fa: f32, fb: f32, threshold: f32) -> Point3 {
    if libm::fabsf(threshold - fa) < INTERPOLATION_EPSILON {
        return a;
    }
    if libm::fabsf(threshold - fb) < INTERPOLATION_EPSILON {
        return b;
    }
    if libm::fabsf(fa - fb) < INTERPOLATION_EPSILON {
        return a;
    }

    let mu = (threshold - fa) / (fb - fa);
    Point3::new(
        a.x + mu * (b.x - a.x),
        a.y + mu * (b.y - a.y),
        a.z + mu * (b.z - a.z),
    )
}

/// Compute the cube configuration index from its corner values.
///
/// Bit `i` is set when corner `i` is strictly below `threshold`. NaN never
/// compares below, so NaN corners leave their bit clear.
#[inline]
pub fn cube_index(corner_values: &[f32; 8], threshold: f32) -> usize {
    let mut index = 0;
    for (i, &value) in corner_values.iter().enumerate() {
        if value < threshold {
            index |= 1 << i;
        }
    }
    index
}

/// Gradient estimate shared by every triangle of one cube, normalized.
///
/// Each component is the sum of the four corner values on the high side of
/// that axis minus the sum on the low side. A cube with no variation yields
/// the zero vector.
#[inline]
pub fn cube_normal(v: &[f32; 8]) -> Vector3 {
    let mut normal = Vector3::zero();
    write_cube_normal(&mut normal, v);
    normal
}

/// In-place form of [`cube_normal`], used by the polygonizer's normal slot.
#[inline]
pub(crate) fn write_cube_normal(normal: &mut Vector3, v: &[f32; 8]) {
    normal
        .set(
            (v[1] + v[2] + v[5] + v[6]) - (v[0] + v[3] + v[4] + v[7]),
            (v[4] + v[5] + v[6] + v[7]) - (v[0] + v[1] + v[2] + v[3]),
            (v[2] + v[3] + v[6] + v[7]) - (v[0] + v[1] + v[4] + v[5]),
        )
        .normalize();
}

/// Number of triangles the table produces for a configuration.
#[inline]
pub fn triangle_count(config: usize) -> usize {
    TRI_TABLE[config & 0xff]
        .iter()
        .take_while(|&&e| e != -1)
        .count()
        / 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_edge_midpoint() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let p = interpolate_edge(a, b, 1.0, 0.0, 0.5);
        assert!((p - Point3::new(0.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_interpolate_edge_quarter() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(0.0, 4.0, 0.0);
        let p = interpolate_edge(a, b, 0.0, 1.0, 0.25);
        assert!((p - Point3::new(0.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_interpolate_edge_snaps_to_a() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(2.0, 2.0, 3.0);
        for fb in [-100.0, 0.0, 0.9, 1e6] {
            assert_eq!(interpolate_edge(a, b, 0.5 + 1e-6, fb, 0.5), a);
        }
    }

    #[test]
    fn test_interpolate_edge_snaps_to_b() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(2.0, 2.0, 3.0);
        assert_eq!(interpolate_edge(a, b, 10.0, 0.5, 0.5), b);
    }

    #[test]
    fn test_interpolate_edge_snap_prefers_a() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        assert_eq!(interpolate_edge(a, b, 0.5, 0.5, 0.5), a);
    }

    #[test]
    fn test_interpolate_edge_flat_edge_defaults_to_a() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let p = interpolate_edge(a, b, 0.3, 0.3, 0.5);
        assert_eq!(p, a);
        assert!(p.is_finite());
    }

    #[test]
    fn test_cube_index() {
        assert_eq!(cube_index(&[1.0; 8], 0.0), 0);
        assert_eq!(cube_index(&[-1.0; 8], 0.0), 255);

        let mut values = [1.0; 8];
        values[0] = -1.0;
        assert_eq!(cube_index(&values, 0.0), 1);
        values[7] = -1.0;
        assert_eq!(cube_index(&values, 0.0), 129);
    }

    #[test]
    fn test_cube_index_is_strict() {
        // Equal to threshold is not below it
        assert_eq!(cube_index(&[0.5; 8], 0.5), 0);
    }

    #[test]
    fn test_cube_index_nan_is_not_below() {
        let mut values = [-1.0; 8];
        values[3] = f32::NAN;
        assert_eq!(cube_index(&values, 0.0), 255 & !(1 << 3));
    }

    #[test]
    fn test_cube_normal_points_up_the_gradient() {
        // Field increasing along +y only
        let values = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        let n = cube_normal(&values);
        assert!((n - Vector3::new(0.0, 1.0, 0.0)).length() < 1e-6);

        // Field increasing along +z only (corners 2, 3, 6, 7 have z = 1)
        let values = [0.0, 0.0, 2.0, 2.0, 0.0, 0.0, 2.0, 2.0];
        let n = cube_normal(&values);
        assert!((n - Vector3::new(0.0, 0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_cube_normal_flat_field_is_zero() {
        assert_eq!(cube_normal(&[3.0; 8]), Vector3::zero());
    }

    #[test]
    fn test_triangle_count() {
        assert_eq!(triangle_count(0), 0);
        assert_eq!(triangle_count(255), 0);
        assert_eq!(triangle_count(1), 1);
        assert_eq!(triangle_count(3), 2);
        for config in 0..256 {
            assert!(triangle_count(config) <= 5);
        }
    }
}
