//! Shape Extraction Demo
//!
//! Polygonizes a few analytic fields and prints mesh statistics:
//! 1. Sphere, torus and gyroid fields
//! 2. Streaming count (no allocation) vs owned mesh extraction
//! 3. Surface area compared with the closed form where one exists
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release --bin shape_extraction -- 0.05
//! ```
//!
//! The optional argument is the cube edge length (default 0.05).

use std::env;
use std::f32::consts::PI;

use instant::Instant;

use isomesh_core::{CountingSink, Point3, Polygonizer, PolygonizerConfig, ScalarField};
use isomesh_rs::{extract_mesh, MeshStats};

fn sphere(x: f32, y: f32, z: f32) -> f32 {
    0.8 - (x * x + y * y + z * z).sqrt()
}

fn torus(x: f32, y: f32, z: f32) -> f32 {
    let ring = (x * x + z * z).sqrt() - 0.6;
    0.25 - (ring * ring + y * y).sqrt()
}

fn gyroid(x: f32, y: f32, z: f32) -> f32 {
    let s = 2.0 * PI;
    (s * x).sin() * (s * y).cos() + (s * y).sin() * (s * z).cos() + (s * z).sin() * (s * x).cos()
}

fn run_shape<F>(name: &str, field: F, config: PolygonizerConfig, expected_area: Option<f32>)
where
    F: ScalarField + Copy,
{
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ {:<60}│", name);
    println!("└─────────────────────────────────────────────────────────────┘");

    // Streaming count
    let start = Instant::now();
    let count = match Polygonizer::new(config, field, CountingSink::default()) {
        Ok(mut polygonizer) => polygonizer.generate(Point3::zero()),
        Err(e) => {
            eprintln!("Error building polygonizer: {}", e);
            std::process::exit(1);
        }
    };
    let count_time = start.elapsed();

    // Owned mesh
    let start = Instant::now();
    let mesh = match extract_mesh(config, field, Point3::zero()) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("Error extracting mesh: {}", e);
            std::process::exit(1);
        }
    };
    let mesh_time = start.elapsed();

    let stats = MeshStats::from_mesh(&mesh);
    println!("  [Streaming Count]");
    println!("    Triangles:     {}", count);
    println!("    Time:          {:.3}s", count_time.as_secs_f64());
    println!("  [Owned Mesh]");
    println!("    Triangles:     {}", stats.triangle_count);
    println!("    Time:          {:.3}s", mesh_time.as_secs_f64());
    println!("    Throughput:    {:.0} triangles/sec",
             stats.triangle_count as f64 / mesh_time.as_secs_f64().max(1e-9));
    println!("  Surface area:    {:.4}", stats.surface_area);
    if let Some(expected) = expected_area {
        let error = (stats.surface_area - expected).abs() / expected * 100.0;
        println!("  Closed form:     {:.4} ({:.2}% off)", expected, error);
    }
    if stats.has_bounds() {
        println!("  Bounding box:    ({:.2}, {:.2}, {:.2}) → ({:.2}, {:.2}, {:.2})",
                 stats.bbox_min.x, stats.bbox_min.y, stats.bbox_min.z,
                 stats.bbox_max.x, stats.bbox_max.y, stats.bbox_max.z);
    }
    println!();
}

fn main() {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("          Isomesh Shape Extraction");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    let step = env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<f32>().ok())
        .unwrap_or(0.05);
    let config = PolygonizerConfig::new(1.0, step, 0.0);
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    println!("  Cell radius:     {}", config.cell_radius);
    println!("  Cell step:       {}", config.cell_step);
    println!("  Cubes per axis:  {}", config.cells_per_axis());
    println!();

    run_shape("Sphere (r = 0.8)", sphere, config, Some(4.0 * PI * 0.8 * 0.8));
    run_shape("Torus (R = 0.6, r = 0.25)", torus, config, Some(4.0 * PI * PI * 0.6 * 0.25));
    run_shape("Gyroid (period 1)", gyroid, config, None);

    log::info!("shape extraction finished with step {}", step);
}
