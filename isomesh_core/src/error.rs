//! Error types for isomesh_core.
//!
//! The only fallible operation is polygonizer construction. No external
//! dependencies so the crate stays no_std.

use core::fmt;

/// Precondition violations detected when building a polygonizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IsomeshCoreError {
    /// The cube edge length is zero, negative or not finite.
    NonPositiveStep {
        /// The rejected step.
        step: f32,
    },
    /// The lattice half-width is zero, negative or not finite.
    NonPositiveRadius {
        /// The rejected radius.
        radius: f32,
    },
    /// The isosurface threshold is NaN or infinite.
    NonFiniteThreshold {
        /// The rejected threshold.
        threshold: f32,
    },
    /// `2 * radius / step` is not finite, or the cube count overflows `usize`.
    LatticeTooLarge {
        /// The lattice half-width.
        radius: f32,
        /// The cube edge length.
        step: f32,
    },
}

impl fmt::Display for IsomeshCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsomeshCoreError::NonPositiveStep { step } => {
                write!(f, "cell step must be positive and finite, got {}", step)
            }
            IsomeshCoreError::NonPositiveRadius { radius } => {
                write!(f, "cell radius must be positive and finite, got {}", radius)
            }
            IsomeshCoreError::NonFiniteThreshold { threshold } => {
                write!(f, "threshold must be finite, got {}", threshold)
            }
            IsomeshCoreError::LatticeTooLarge { radius, step } => write!(
                f,
                "lattice of radius {} with step {} has too many cubes",
                radius, step
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IsomeshCoreError {}
