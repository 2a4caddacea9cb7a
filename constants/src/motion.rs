/// Base positional approach rate while assembling (per second, scaled by
/// per-entity weight).
pub const FORM_APPROACH_RATE: f32 = 1.5;

/// Base positional approach rate while dispersing (per second, unweighted).
pub const CHAOS_APPROACH_RATE: f32 = 1.2;

/// Time constant of the foliage progress decay (seconds). Deliberately
/// slower than the entity lerp so the cloud and the ornaments desynchronise.
pub const FOLIAGE_TIME_CONSTANT: f32 = 0.8;

/// Exponential damping rate for the emblem scale (per second).
pub const EMBLEM_SCALE_RATE: f32 = 2.0;

/// Constant emblem spin speed (radians per second).
pub const EMBLEM_SPIN_SPEED: f32 = 0.8;

/// Wobble amplitude for formed ornaments (radians).
pub const ORNAMENT_WOBBLE_AMPLITUDE: f32 = 0.12;

/// Peak emissive intensity for string lights while the tree is formed.
pub const LIGHT_MAX_EMISSIVE: f32 = 8.0;

/// Per-frame damping rate applied to the orbit camera polar angle and
/// distance (per second).
pub const CAMERA_DAMP_RATE: f32 = 4.0;

/// Idle auto-rotate speed when no hand is present and the tree is formed
/// (radians per second).
pub const AUTO_ROTATE_SPEED: f32 = 0.15;
