//! Property-based tests verifying extraction against closed-form surfaces.

use isomesh_core::LatticeBounds;
use isomesh_rs::{count_triangles, extract_mesh, Point3, PolygonizerConfig, Vector3};
use proptest::prelude::*;

/// Sphere field, positive inside
fn sphere(center: Point3, radius: f32) -> impl Fn(f32, f32, f32) -> f32 + Copy {
    move |x, y, z| radius - Point3::new(x, y, z).distance(center)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Horizontal plane: every vertex sits on the plane and every normal points up
    #[test]
    fn plane_vertices_lie_on_plane(
        height in -0.4f32..0.4,
        cx in -2.0f32..2.0,
        cz in -2.0f32..2.0,
        step in 0.05f32..0.3,
    ) {
        let config = PolygonizerConfig::new(0.5, step, 0.0);
        let field = move |_x: f32, y: f32, _z: f32| y - height;
        let mesh = extract_mesh(config, field, Point3::new(cx, 0.0, cz)).unwrap();

        prop_assert!(!mesh.is_empty());
        for (tri, n) in mesh.iter() {
            for v in tri {
                prop_assert!((v.y - height).abs() < 1e-4, "vertex {:?} off plane {}", v, height);
            }
            prop_assert!((*n - Vector3::new(0.0, 1.0, 0.0)).length() < 1e-5, "normal {:?}", n);
        }
    }

    /// Sphere vertices stay within one cube of the true surface
    #[test]
    fn sphere_vertices_near_surface(
        radius in 0.2f32..0.6,
        cx in -1.0f32..1.0,
        cy in -1.0f32..1.0,
        cz in -1.0f32..1.0,
    ) {
        let center = Point3::new(cx, cy, cz);
        let config = PolygonizerConfig::new(0.8, 0.1, 0.0);
        let mesh = extract_mesh(config, sphere(center, radius), center).unwrap();

        prop_assert!(!mesh.is_empty());
        for tri in mesh.triangles() {
            for v in tri {
                let d = v.distance(center);
                prop_assert!((d - radius).abs() < config.cell_step,
                    "vertex {:?} at distance {} from surface of radius {}", v, d, radius);
            }
        }
    }

    /// Every vertex lies inside the scanned lattice
    #[test]
    fn vertices_inside_lattice(
        radius in 0.2f32..1.5,
        cell_radius in 0.2f32..1.0,
        step in 0.05f32..0.25,
        cx in -1.0f32..1.0,
        cy in -1.0f32..1.0,
    ) {
        let center = Point3::new(cx, cy, 0.0);
        let config = PolygonizerConfig::new(cell_radius, step, 0.0);
        let lattice = LatticeBounds::around(&config, center);
        let mesh = extract_mesh(config, sphere(Point3::zero(), radius), center).unwrap();

        // Allow for rounding in a + mu * (b - a) at the outer faces
        let lo = lattice.min() - Vector3::splat(1e-5);
        let hi = lattice.max() + Vector3::splat(1e-5);
        for tri in mesh.triangles() {
            for &v in tri {
                prop_assert!(v.min(lo) == lo && v.max(hi) == hi, "{:?} outside {:?}", v, lattice);
            }
        }
    }

    /// Counting and collecting agree
    #[test]
    fn count_matches_collected(
        radius in 0.1f32..0.9,
        threshold in -0.2f32..0.2,
    ) {
        let config = PolygonizerConfig::new(0.7, 0.1, threshold);
        let field = sphere(Point3::zero(), radius);
        let mesh = extract_mesh(config, field, Point3::zero()).unwrap();
        let count = count_triangles(config, field, Point3::zero()).unwrap();
        prop_assert_eq!(count, mesh.len());
    }

    /// Repeated extraction is bit-identical
    #[test]
    fn extraction_is_deterministic(
        radius in 0.2f32..0.6,
        cx in -0.3f32..0.3,
    ) {
        let center = Point3::new(cx, 0.0, 0.0);
        let config = PolygonizerConfig::new(0.7, 0.1, 0.0);
        let first = extract_mesh(config, sphere(center, radius), center).unwrap();
        let second = extract_mesh(config, sphere(center, radius), center).unwrap();
        prop_assert_eq!(first, second);
    }
}
