//! Map loading and debug display.
//!
//! External collaborators of the filter core: nothing here touches the
//! belief-update contract.

pub mod display;
pub mod map_loader;
