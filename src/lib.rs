//! ChitraLocalize - histogram localization for colored cyclic grid worlds
//!
//! # Architecture
//!
//! The crate is organized into 3 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      bin/                           │  ← Driver
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← Map loading, display
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                  algorithms/                        │  ← Blur kernel, filter cycle
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Grid storage, math
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Filtering cycle
//!
//! A robot lives on a finite rectangular grid whose edges wrap around
//! (a torus) and whose cells carry known colors. The filter maintains a
//! belief distribution over cells, starting uniform, and alternates:
//!
//! - **Motion update**: shift the belief by the intended displacement
//!   (wrapping at the edges), then blur it over each 3x3 neighborhood to
//!   model motion noise.
//! - **Sensor update**: multiply each cell's belief by `p_hit` where the
//!   map color matches the observation and `p_miss` elsewhere, then
//!   renormalize.
//!
//! Every operation returns a fresh grid whose cells sum to one; inputs
//! are never mutated.

// ============================================================================
// Errors
// ============================================================================
pub mod error;

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;

// ============================================================================
// Layer 2: Algorithms (depends on core)
// ============================================================================
pub mod algorithms;

// ============================================================================
// Layer 3: I/O helpers (depends on core)
// ============================================================================
pub mod io;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

pub use error::{Error, Result};

// Core types and math
pub use crate::core::grid::{BeliefGrid, ColorGrid, Grid};
pub use crate::core::math::{
    grids_close_enough, normalize, scalars_close_enough, total, wrap, zeros,
    CLOSE_ENOUGH_TOLERANCE,
};

// Algorithms
pub use algorithms::blur::{blur, BlurWindow};
pub use algorithms::filter::{
    initialize_beliefs, motion_update, sensor_update, Displacement, FilterConfig,
    HistogramFilter, SensorModel,
};

// I/O
pub use io::display::render_beliefs;
pub use io::map_loader::{parse_map, read_map};
