//! Text map loading.
//!
//! A map file holds one line per grid row, with space-separated
//! single-character color tokens:
//!
//! ```text
//! r g g
//! g g g
//! g g r
//! ```

use crate::core::grid::ColorGrid;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Parse map text into a color grid.
///
/// Blank lines are skipped. Every token must be a single character and
/// all rows must have the same length.
pub fn parse_map(text: &str) -> Result<ColorGrid> {
    let mut rows = Vec::new();

    for (line_number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let mut row = Vec::new();
        for token in line.split_whitespace() {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(color), None) => row.push(color),
                _ => {
                    return Err(Error::InvalidMap(format!(
                        "line {}: token {:?} is not a single character",
                        line_number + 1,
                        token
                    )))
                }
            }
        }
        rows.push(row);
    }

    ColorGrid::from_rows(rows)
}

/// Load a color grid from a map file.
pub fn read_map<P: AsRef<Path>>(path: P) -> Result<ColorGrid> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let map = parse_map(&text)?;

    let (height, width) = map.dimensions();
    log::debug!("loaded {}x{} map from {}", height, width, path.display());
    Ok(map)
}
