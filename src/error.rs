//! Error types for ChitraLocalize

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Localization error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Grid construction or validation failure (empty, ragged, zero-sized)
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Two grids that must share dimensions do not
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// Required (height, width)
        expected: (usize, usize),
        /// Offending (height, width)
        actual: (usize, usize),
    },

    /// A grid with zero total mass was given to normalize
    #[error("Degenerate distribution: grid has no probability mass to normalize")]
    DegenerateDistribution,

    /// Parameter outside its documented range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed map text
    #[error("Invalid map: {0}")]
    InvalidMap(String),

    /// Malformed scenario file
    #[error("Scenario error: {0}")]
    Scenario(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Scenario(e.to_string())
    }
}
