//! Marching Cubes building blocks.
//!
//! This module provides the per-cube pieces of the algorithm:
//!
//! - Compile-time lookup tables for the 256 cube configurations
//! - Edge interpolation with degenerate-case snapping
//! - Cube classification and the per-cube normal
//!
//! # Example
//!
//! ```ignore
//! use isomesh_core::marching_cubes::{cube_index, EDGE_TABLE};
//!
//! let config = cube_index(&corner_values, 0.0);
//! if EDGE_TABLE[config] == 0 {
//!     // surface does not cross this cube
//! }
//! ```

mod algorithm;
mod tables;

pub use algorithm::{
    cube_index, cube_normal, interpolate_edge, triangle_count, INTERPOLATION_EPSILON,
};
pub use tables::{CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE};

pub(crate) use algorithm::write_cube_normal;
