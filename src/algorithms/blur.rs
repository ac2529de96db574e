//! Cyclic 3x3 blur modeling motion noise.
//!
//! Probability mass spreads from each cell to its eight neighbors on a
//! toroidal grid. With `blurring = 0.12`, a unit spike
//!
//! ```text
//! 0.00 0.00 0.00
//! 0.00 1.00 0.00
//! 0.00 0.00 0.00
//! ```
//!
//! becomes
//!
//! ```text
//! 0.01 0.02 0.01
//! 0.02 0.88 0.02
//! 0.01 0.02 0.01
//! ```
//!
//! Mass that spills past an edge re-enters on the opposite side.

use crate::core::grid::BeliefGrid;
use crate::core::math::{self, wrap};
use crate::error::{Error, Result};

/// 3x3 window of spread weights derived from a single blurring factor.
///
/// The center keeps `1 - blurring`; each edge-adjacent neighbor takes
/// `blurring / 6` and each corner `blurring / 12`, so the window sums to
/// one and blurring conserves probability mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurWindow {
    weights: [[f32; 3]; 3],
}

impl BlurWindow {
    /// Build the window for a blurring factor in `[0, 1]`.
    pub fn new(blurring: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&blurring) {
            return Err(Error::InvalidParameter(format!(
                "blurring must be in [0, 1], got {}",
                blurring
            )));
        }

        let center = 1.0 - blurring;
        let adjacent = blurring / 6.0;
        let corner = blurring / 12.0;

        Ok(Self {
            weights: [
                [corner, adjacent, corner],
                [adjacent, center, adjacent],
                [corner, adjacent, corner],
            ],
        })
    }

    /// Weight for a neighbor offset, each component in `{-1, 0, 1}`.
    #[inline]
    pub fn weight(&self, dy: i32, dx: i32) -> f32 {
        self.weights[(dy + 1) as usize][(dx + 1) as usize]
    }
}

/// Spread each cell's mass over its 3x3 neighborhood, wrapping at edges.
///
/// Accumulates into a fresh zero grid and renormalizes on exit, so
/// `blur(g, 0.0)` equals `normalize(g)`. Grids smaller than 3x3 are fine:
/// several offsets wrap onto the same cell and their contributions add up,
/// which is the intended toroidal behavior.
pub fn blur(grid: &BeliefGrid, blurring: f32) -> Result<BeliefGrid> {
    let window = BlurWindow::new(blurring)?;
    let (height, width) = grid.dimensions();
    let mut blurred = math::zeros(height, width)?;

    for (row, cells) in grid.rows().enumerate() {
        for (col, &value) in cells.iter().enumerate() {
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let dest_row = wrap(row as i64 + dy as i64, height);
                    let dest_col = wrap(col as i64 + dx as i64, width);
                    *blurred.at_mut(dest_row, dest_col) += window.weight(dy, dx) * value;
                }
            }
        }
    }

    math::normalize(&blurred)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Grid;
    use crate::core::math::{grids_close_enough, normalize, total};
    use approx::assert_relative_eq;

    fn spike_3x3() -> BeliefGrid {
        let mut rows = vec![vec![0.0; 3]; 3];
        rows[1][1] = 1.0;
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_window_sums_to_one() {
        let window = BlurWindow::new(0.12).unwrap();
        let mut sum = 0.0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                sum += window.weight(dy, dx);
            }
        }
        assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_window_rejects_out_of_range() {
        assert!(BlurWindow::new(-0.1).is_err());
        assert!(BlurWindow::new(1.1).is_err());
    }

    #[test]
    fn test_blur_spike_documented_example() {
        let blurred = blur(&spike_3x3(), 0.12).unwrap();

        let expected = Grid::from_rows(vec![
            vec![0.01, 0.02, 0.01],
            vec![0.02, 0.88, 0.02],
            vec![0.01, 0.02, 0.01],
        ])
        .unwrap();
        assert!(grids_close_enough(&blurred, &expected));
    }

    #[test]
    fn test_blur_zero_is_normalize() {
        let grid = Grid::from_rows(vec![vec![1.0, 3.0], vec![2.0, 2.0]]).unwrap();
        let blurred = blur(&grid, 0.0).unwrap();
        assert!(grids_close_enough(&blurred, &normalize(&grid).unwrap()));
    }

    #[test]
    fn test_blur_conserves_mass() {
        let grid = Grid::from_rows(vec![
            vec![0.1, 0.3, 0.0],
            vec![0.2, 0.1, 0.1],
            vec![0.05, 0.05, 0.1],
        ])
        .unwrap();
        for &blurring in &[0.0, 0.12, 0.5, 1.0] {
            let blurred = blur(&grid, blurring).unwrap();
            assert_relative_eq!(total(&blurred), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_blur_1x1_keeps_all_mass() {
        let grid = Grid::from_rows(vec![vec![1.0]]).unwrap();
        let blurred = blur(&grid, 0.12).unwrap();
        assert_relative_eq!(*blurred.get(0, 0).unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_blur_2x2_wraps_contributions() {
        // On a 2x2 torus the two horizontal offsets land on the same
        // neighbor, as do the two vertical ones and all four corners.
        let mut rows = vec![vec![0.0; 2]; 2];
        rows[0][0] = 1.0;
        let grid = Grid::from_rows(rows).unwrap();

        let blurred = blur(&grid, 0.12).unwrap();
        let expected = Grid::from_rows(vec![vec![0.88, 0.04], vec![0.04, 0.04]]).unwrap();
        assert!(grids_close_enough(&blurred, &expected));
    }
}
