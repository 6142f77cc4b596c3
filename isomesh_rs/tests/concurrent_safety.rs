//! Concurrent safety tests for isomesh_rs.
//!
//! A polygonizer is single-threaded; concurrency comes from running one
//! instance per thread over a shared field. These tests check that parallel
//! runs see the same results as sequential ones.

use isomesh_rs::{
    extract_mesh, extract_regions, CountingSink, Point3, Polygonizer, PolygonizerConfig,
    ScalarField, TriangleMesh,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

// =============================================================================
// Test Fields
// =============================================================================

/// Sphere field shared between threads, counting its samples
struct CountingSphere {
    radius: f32,
    samples: AtomicUsize,
}

impl CountingSphere {
    fn new(radius: f32) -> Self {
        Self {
            radius,
            samples: AtomicUsize::new(0),
        }
    }
}

impl ScalarField for CountingSphere {
    fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        self.samples.fetch_add(1, Ordering::Relaxed);
        self.radius - (x * x + y * y + z * z).sqrt()
    }
}

fn gyroid(x: f32, y: f32, z: f32) -> f32 {
    let s = 4.0;
    (s * x).sin() * (s * y).cos() + (s * y).sin() * (s * z).cos() + (s * z).sin() * (s * x).cos()
}

fn region_centers(n: usize) -> Vec<Point3> {
    (0..n)
        .map(|i| {
            let t = i as f32 * 0.37;
            Point3::new(t.cos(), t.sin(), t * 0.1)
        })
        .collect()
}

// =============================================================================
// Thread-per-Polygonizer Tests
// =============================================================================

#[test]
fn test_threads_with_own_polygonizers() {
    let field = Arc::new(CountingSphere::new(0.6));
    let config = PolygonizerConfig::new(0.8, 0.1, 0.0);
    let num_threads = 8;

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let field = Arc::clone(&field);
            thread::spawn(move || {
                let sample = |x: f32, y: f32, z: f32| field.sample(x, y, z);
                let mut polygonizer =
                    Polygonizer::new(config, sample, CountingSink::default()).unwrap();
                polygonizer.generate(Point3::zero())
            })
        })
        .collect();

    let counts: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked"))
        .collect();

    assert!(counts[0] > 0);
    assert!(counts.iter().all(|&c| c == counts[0]), "counts differ: {:?}", counts);

    // 8 samples per cube per thread
    let cubes = config.cells_per_axis().pow(3);
    assert_eq!(field.samples.load(Ordering::Relaxed), num_threads * cubes * 8);
}

#[test]
fn test_threads_produce_identical_meshes() {
    let config = PolygonizerConfig::new(0.6, 0.1, 0.0);
    let reference = extract_mesh(config, gyroid, Point3::zero()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(move || extract_mesh(config, gyroid, Point3::zero()).unwrap()))
        .collect();

    for handle in handles {
        let mesh = handle.join().expect("Thread panicked");
        assert_eq!(mesh, reference);
    }
}

// =============================================================================
// Rayon Region Tests
// =============================================================================

#[test]
fn test_regions_match_sequential() {
    let config = PolygonizerConfig::new(0.5, 0.1, 0.0);
    let centers = region_centers(32);

    let parallel = extract_regions(config, &gyroid, &centers).unwrap();
    assert_eq!(parallel.len(), centers.len());

    for (mesh, &center) in parallel.iter().zip(&centers) {
        let sequential = extract_mesh(config, gyroid, center).unwrap();
        assert_eq!(*mesh, sequential);
    }
}

#[test]
fn test_regions_share_one_field() {
    let field = CountingSphere::new(0.9);
    let config = PolygonizerConfig::new(0.3, 0.1, 0.0);
    let centers = region_centers(16);

    let meshes = extract_regions(config, &field, &centers).unwrap();
    let total: usize = meshes.iter().map(TriangleMesh::len).sum();
    assert!(total > 0);

    let cubes = config.cells_per_axis().pow(3);
    assert_eq!(field.samples.load(Ordering::Relaxed), centers.len() * cubes * 8);
}

#[test]
fn test_regions_repeatable_under_contention() {
    let config = PolygonizerConfig::new(0.4, 0.1, 0.0);
    let centers = Arc::new(region_centers(12));
    let reference = extract_regions(config, &gyroid, &centers).unwrap();
    let reference = Arc::new(reference);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let centers = Arc::clone(&centers);
            let reference = Arc::clone(&reference);
            thread::spawn(move || {
                for _ in 0..3 {
                    let meshes = extract_regions(config, &gyroid, &centers).unwrap();
                    assert_eq!(meshes, *reference);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
}
