//! Per-frame choreography: moves every animated entity class toward the
//! active arrangement with class-specific damping and rotation behaviour.

/// First-order approach helpers shared by every entity class.
pub mod approach;

/// Scene arrangement resource, command events and the global position system.
pub mod orchestrator;

/// Ornament rotation: free-spin in chaos, outward-facing wobble when formed.
pub mod ornaments;

/// Decorative prop rotation: continuous free-spin in both arrangements.
pub mod props;

/// String light flicker: per-light emissive sinusoid, off while dispersed.
pub mod lights;

/// Focal emblem: damped scale toward the arrangement, constant spin.
pub mod emblem;
