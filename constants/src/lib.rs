//! Shared scene configuration for the tree scene engine.
//!
//! Layout dimensions, colour palettes, motion constants and gesture
//! thresholds used by both the placement generator and the per-frame
//! choreography systems.

pub mod gesture;
pub mod layout;
pub mod motion;
pub mod palette;
