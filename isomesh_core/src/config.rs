//! Polygonizer configuration.

use crate::error::IsomeshCoreError;

/// Polygonizer parameters (immutable once a polygonizer is built).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolygonizerConfig {
    /// Half-width, in world units, of the cubic lattice scanned around each query point.
    pub cell_radius: f32,
    /// Edge length of one sampling cube.
    pub cell_step: f32,
    /// Isosurface level.
    pub threshold: f32,
}

impl PolygonizerConfig {
    /// Create a new configuration.
    ///
    /// # Arguments
    /// * `cell_radius` - Lattice half-width in world units
    /// * `cell_step` - Cube edge length in world units
    /// * `threshold` - Isosurface level
    #[inline]
    pub const fn new(cell_radius: f32, cell_step: f32, threshold: f32) -> Self {
        Self {
            cell_radius,
            cell_step,
            threshold,
        }
    }

    /// Set the lattice half-width.
    #[inline]
    pub const fn with_cell_radius(mut self, cell_radius: f32) -> Self {
        self.cell_radius = cell_radius;
        self
    }

    /// Set the cube edge length.
    #[inline]
    pub const fn with_cell_step(mut self, cell_step: f32) -> Self {
        self.cell_step = cell_step;
        self
    }

    /// Set the isosurface level.
    #[inline]
    pub const fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check the preconditions a polygonizer relies on.
    ///
    /// # Errors
    /// * `NonPositiveStep` - `cell_step` is not a positive finite number
    /// * `NonPositiveRadius` - `cell_radius` is not a positive finite number
    /// * `NonFiniteThreshold` - `threshold` is NaN or infinite
    /// * `LatticeTooLarge` - the scanned lattice has no finite cube count
    ///   that fits in `usize`
    pub fn validate(&self) -> Result<(), IsomeshCoreError> {
        // Written as `!(x > 0.0)` so NaN is rejected too
        if !(self.cell_step > 0.0) || !self.cell_step.is_finite() {
            return Err(IsomeshCoreError::NonPositiveStep {
                step: self.cell_step,
            });
        }
        if !(self.cell_radius > 0.0) || !self.cell_radius.is_finite() {
            return Err(IsomeshCoreError::NonPositiveRadius {
                radius: self.cell_radius,
            });
        }
        if !self.threshold.is_finite() {
            return Err(IsomeshCoreError::NonFiniteThreshold {
                threshold: self.threshold,
            });
        }
        if self.checked_cells_per_axis().is_none() {
            return Err(IsomeshCoreError::LatticeTooLarge {
                radius: self.cell_radius,
                step: self.cell_step,
            });
        }
        Ok(())
    }

    /// Nominal number of cubes scanned along each axis.
    ///
    /// `ceil(2 * radius / step) + 1`. A ratio within two ulps of a whole number
    /// is taken as that number, so a radius that is a whole number of steps
    /// is not pushed up by rounding noise. [`LatticeBounds::around`] adds one
    /// more cube when float rounding would leave the far side of the query
    /// region uncovered.
    ///
    /// Saturates at `usize::MAX` for configurations [`validate`] rejects.
    ///
    /// [`LatticeBounds::around`]: crate::LatticeBounds::around
    /// [`validate`]: Self::validate
    #[inline]
    pub fn cells_per_axis(&self) -> usize {
        self.checked_cells_per_axis().unwrap_or(usize::MAX)
    }

    /// [`cells_per_axis`](Self::cells_per_axis), or `None` if the lattice is
    /// unbounded or its cube count (with one extra cube per axis) overflows
    /// `usize`.
    pub fn checked_cells_per_axis(&self) -> Option<usize> {
        let ratio = 2.0 * self.cell_radius / self.cell_step;
        if !ratio.is_finite() || !(ratio >= 0.0) {
            return None;
        }
        let nearest = libm::roundf(ratio);
        let spans = if libm::fabsf(ratio - nearest) <= 2.0 * f32::EPSILON * ratio {
            nearest
        } else {
            libm::ceilf(ratio)
        };
        if spans >= usize::MAX as f32 {
            return None;
        }
        let cells = (spans as usize).checked_add(1)?;
        let padded = cells.checked_add(1)?;
        padded.checked_mul(padded)?.checked_mul(padded)?;
        Some(cells)
    }
}

impl Default for PolygonizerConfig {
    fn default() -> Self {
        Self {
            cell_radius: 1.0,
            cell_step: 0.1,
            threshold: 0.0,
        }
    }
}
