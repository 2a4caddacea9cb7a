/// Landmark index of the wrist in a 21-point hand sample.
pub const WRIST: usize = 0;

/// Landmark index of the middle-finger base (MCP joint).
pub const MIDDLE_FINGER_MCP: usize = 9;

/// Number of landmarks in one hand sample.
pub const LANDMARK_COUNT: usize = 21;

/// Horizontal hand offset to rotation-rate gain.
pub const ROTATION_GAIN: f32 = 2.4;

/// Rotation rates below this magnitude are snapped to zero so a centred,
/// stationary hand does not jitter the camera.
pub const ROTATION_DEAD_ZONE: f32 = 0.01;

/// Polar angle bounds the tilt target maps onto (radians from vertical).
pub const POLAR_MIN: f32 = 0.25;
pub const POLAR_MAX: f32 = 1.45;

/// Camera distance bounds the zoom target maps onto.
pub const DISTANCE_MIN: f32 = 30.0;
pub const DISTANCE_MAX: f32 = 90.0;

/// Apparent hand size band (wrist to middle-MCP distance, normalized image
/// coordinates) remapped onto the zoom range. Larger hand reads as closer.
pub const HAND_SPAN_FAR: f32 = 0.08;
pub const HAND_SPAN_NEAR: f32 = 0.30;

/// Width of the orbit distance band pinned around the damped zoom value.
pub const DISTANCE_BAND: f32 = 2.0;

/// Minimum classification confidence before a pose emits a scene command.
pub const POSE_CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Gesture labels recognised as scene-state commands.
pub const POSE_SCATTER: &str = "Open_Palm";
pub const POSE_GATHER: &str = "Closed_Fist";
