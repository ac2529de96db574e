//! Human-readable grid rendering.
//!
//! Read-only debug output for driver binaries and tests.

use crate::core::grid::{BeliefGrid, Grid};
use std::fmt;

/// Render a belief grid with two decimal places per cell.
pub fn render_beliefs(grid: &BeliefGrid) -> String {
    let mut out = String::new();
    for cells in grid.rows() {
        for (col, value) in cells.iter().enumerate() {
            if col > 0 {
                out.push(' ');
            }
            out.push_str(&format!("{:.2}", value));
        }
        out.push('\n');
    }
    out
}

impl fmt::Display for Grid<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cells in self.rows() {
            for (col, color) in cells.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", color)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
