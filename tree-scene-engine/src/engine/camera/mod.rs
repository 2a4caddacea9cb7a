/// Orbit camera state and the per-frame controller that blends gesture
/// intent with the pointer fallback.
pub mod orbit_camera;
