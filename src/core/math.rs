//! Numeric utilities for belief grids.
//!
//! Normalization, toroidal index arithmetic, and tolerance-based
//! comparison. Repeated blur/normalize cycles accumulate floating error,
//! so probability comparisons always go through the tolerance helpers,
//! never `==`.

use crate::core::grid::{BeliefGrid, Grid};
use crate::error::{Error, Result};

/// Tolerance used by the close-enough helpers.
pub const CLOSE_ENOUGH_TOLERANCE: f32 = 1e-4;

/// Wrap a signed index onto `[0, len)`.
///
/// `%` truncates toward zero and yields negative results for negative
/// operands; `rem_euclid` keeps the wrap non-negative for any
/// displacement, which is what a toroidal grid needs.
///
/// # Example
/// ```
/// use chitra_localize::core::math::wrap;
///
/// assert_eq!(wrap(5, 3), 2);
/// assert_eq!(wrap(-1, 3), 2);
/// assert_eq!(wrap(-7, 3), 2);
/// ```
#[inline]
pub fn wrap(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

/// Build a belief grid of zeros.
///
/// Rejects zero dimensions.
pub fn zeros(height: usize, width: usize) -> Result<BeliefGrid> {
    Grid::filled(height, width, 0.0)
}

/// Sum of all cells.
pub fn total(grid: &BeliefGrid) -> f32 {
    grid.cells().iter().sum()
}

/// Scale a grid so its total equals one.
///
/// Returns a fresh grid; the input is untouched. A grid with zero (or
/// non-finite) total has no normalization and fails with
/// [`Error::DegenerateDistribution`] instead of producing NaN cells.
pub fn normalize(grid: &BeliefGrid) -> Result<BeliefGrid> {
    let total = total(grid);
    if total <= 0.0 || !total.is_finite() {
        return Err(Error::DegenerateDistribution);
    }

    let mut normalized = grid.clone();
    for cell in normalized.cells_mut() {
        *cell /= total;
    }
    Ok(normalized)
}

/// Whether two scalars differ by at most [`CLOSE_ENOUGH_TOLERANCE`].
#[inline]
pub fn scalars_close_enough(a: f32, b: f32) -> bool {
    (b - a).abs() <= CLOSE_ENOUGH_TOLERANCE
}

/// Whether every pair of corresponding cells is close enough.
///
/// Grids of differing dimensions are never close.
pub fn grids_close_enough(a: &BeliefGrid, b: &BeliefGrid) -> bool {
    if a.dimensions() != b.dimensions() {
        return false;
    }
    a.cells()
        .iter()
        .zip(b.cells())
        .all(|(&x, &y)| scalars_close_enough(x, y))
}
