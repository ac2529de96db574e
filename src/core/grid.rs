//! Rectangular grid storage shared by color maps and belief distributions.
//!
//! Row-major storage: index = row * width + col.
//!
//! Belief grids are replaced wholesale by every filter step rather than
//! mutated in place, so cell mutation is crate-private and callers only
//! ever observe complete, normalized grids.

use crate::core::math::wrap;
use crate::error::{Error, Result};

/// Rectangular 2D grid with row-major storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: usize,
    height: usize,
}

/// Ground-truth color map, one symbol per cell. Never mutated during a run.
pub type ColorGrid = Grid<char>;

/// Probability distribution over cells. Sums to ~1 after every filter step.
pub type BeliefGrid = Grid<f32>;

impl<T> Grid<T> {
    /// Build a grid from nested rows.
    ///
    /// Rejects empty input and ragged rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        if height == 0 {
            return Err(Error::InvalidGrid("no rows".to_string()));
        }
        let width = rows[0].len();
        if width == 0 {
            return Err(Error::InvalidGrid("first row is empty".to_string()));
        }

        let mut cells = Vec::with_capacity(height * width);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(Error::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    row_index,
                    row.len(),
                    width
                )));
            }
            cells.extend(row);
        }

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Get grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get grid dimensions as (height, width).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Get the cell index for array access.
    #[inline]
    fn cell_index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Get the value at a cell.
    ///
    /// Returns `None` for out-of-bounds indices.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.height && col < self.width {
            Some(&self.cells[self.cell_index(row, col)])
        } else {
            None
        }
    }

    /// Get the value at a signed cell position, wrapping toroidally.
    ///
    /// Any sign or magnitude of index is valid; `(-1, -1)` is the
    /// bottom-right cell.
    #[inline]
    pub fn get_wrapped(&self, row: i64, col: i64) -> &T {
        let row = wrap(row, self.height);
        let col = wrap(col, self.width);
        &self.cells[self.cell_index(row, col)]
    }

    /// Get the raw cells in row-major order.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Mutable access to the raw cells (operations build fresh grids).
    pub(crate) fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }

    /// Set the value at a cell. In-bounds indices only.
    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: T) {
        let index = self.cell_index(row, col);
        self.cells[index] = value;
    }

    /// Mutable reference to a cell. In-bounds indices only.
    #[inline]
    pub(crate) fn at_mut(&mut self, row: usize, col: usize) -> &mut T {
        let index = self.cell_index(row, col);
        &mut self.cells[index]
    }
}

impl<T: Clone> Grid<T> {
    /// Build a grid with every cell set to `value`.
    ///
    /// Rejects zero dimensions.
    pub fn filled(height: usize, width: usize, value: T) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(Error::InvalidGrid(format!(
                "dimensions must be positive, got {}x{}",
                height, width
            )));
        }
        Ok(Self {
            cells: vec![value; height * width],
            width,
            height,
        })
    }
}
