use constants::gesture::{
    DISTANCE_MAX, DISTANCE_MIN, HAND_SPAN_FAR, HAND_SPAN_NEAR, MIDDLE_FINGER_MCP,
    POSE_CONFIDENCE_THRESHOLD, POSE_GATHER, POSE_SCATTER, ROTATION_DEAD_ZONE, ROTATION_GAIN,
    WRIST,
};

use super::sample::GestureSample;

/// Arrangement change requested by a recognised pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseCommand {
    /// Open palm: disperse the scene.
    Scatter,
    /// Closed fist: form the tree.
    Gather,
}

/// One frame's worth of camera intent, derived from a single sample.
/// Absence always maps to exactly this default: zero rotation, no
/// tilt/zoom targets, no command.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraControl {
    /// Signed orbit rate in radians per second.
    pub rotation_rate: f32,
    /// Normalised tilt target in [0, 1], when a hand is present.
    pub tilt: Option<f32>,
    /// Normalised zoom target in [0, 1]; 0 is nearest, 1 is furthest.
    /// A larger apparent hand span therefore gives a smaller value.
    pub zoom: Option<f32>,
    pub command: Option<PoseCommand>,
    pub hand_present: bool,
}

impl Default for CameraControl {
    fn default() -> Self {
        Self {
            rotation_rate: 0.0,
            tilt: None,
            zoom: None,
            command: None,
            hand_present: false,
        }
    }
}

/// Translate the latest sample into camera intent. Pure: same sample in,
/// same control out. A missing or invalid sample yields the default.
pub fn map_sample(sample: Option<&GestureSample>) -> CameraControl {
    let Some(sample) = sample else {
        return CameraControl::default();
    };
    let Some(landmarks) = sample.valid_landmarks() else {
        return CameraControl::default();
    };

    let wrist = landmarks[WRIST];
    let mcp = landmarks[MIDDLE_FINGER_MCP];

    // Horizontal offset from frame centre drives orbit; a small dead zone
    // around the centre keeps a steady hand from creeping.
    let rate = (0.5 - wrist[0]) * ROTATION_GAIN;
    let rotation_rate = if rate.abs() < ROTATION_DEAD_ZONE {
        0.0
    } else {
        rate
    };

    // Vertical wrist position maps directly to the tilt band.
    let tilt = wrist[1].clamp(0.0, 1.0);

    // Apparent hand span shrinks with distance from the lens, so the raw
    // span is inverted: a far hand (small span) reads as zoomed out (1).
    // A degenerate span (coincident landmarks) clamps to fully out.
    let span = ((mcp[0] - wrist[0]).powi(2) + (mcp[1] - wrist[1]).powi(2)).sqrt();
    let zoom = ((HAND_SPAN_NEAR - span) / (HAND_SPAN_NEAR - HAND_SPAN_FAR)).clamp(0.0, 1.0);

    let command = match sample.label.as_deref() {
        Some(label) if sample.confidence >= POSE_CONFIDENCE_THRESHOLD => {
            if label == POSE_SCATTER {
                Some(PoseCommand::Scatter)
            } else if label == POSE_GATHER {
                Some(PoseCommand::Gather)
            } else {
                None
            }
        }
        _ => None,
    };

    CameraControl {
        rotation_rate,
        tilt: Some(tilt),
        zoom: Some(zoom),
        command,
        hand_present: true,
    }
}

/// Map a normalised zoom level onto the orbit distance band. Zoom 0
/// (hand nearest the lens) gives the closest camera.
pub fn zoom_to_distance(zoom: f32) -> f32 {
    DISTANCE_MIN + zoom.clamp(0.0, 1.0) * (DISTANCE_MAX - DISTANCE_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(wrist: [f32; 2], mcp: [f32; 2]) -> GestureSample {
        let mut landmarks = vec![[0.5, 0.5]; 21];
        landmarks[constants::gesture::WRIST] = wrist;
        landmarks[constants::gesture::MIDDLE_FINGER_MCP] = mcp;
        GestureSample {
            timestamp: 0.0,
            landmarks: Some(landmarks),
            label: None,
            confidence: 0.0,
            hand_present: true,
        }
    }

    #[test]
    fn absent_sample_maps_to_exact_default() {
        let control = map_sample(None);
        assert_eq!(control, CameraControl::default());
        assert_eq!(control.rotation_rate, 0.0);

        let absent = GestureSample::absent(1.0);
        assert_eq!(map_sample(Some(&absent)), CameraControl::default());
    }

    #[test]
    fn centred_wrist_sits_in_the_dead_zone() {
        // Offset small enough that offset * gain stays under the dead zone.
        let offset = ROTATION_DEAD_ZONE * 0.5 / ROTATION_GAIN;
        let control = map_sample(Some(&sample_at([0.5 + offset, 0.5], [0.5, 0.4])));
        assert_eq!(control.rotation_rate, 0.0);
        assert!(control.hand_present);
    }

    #[test]
    fn off_centre_wrist_rotates_with_sign_and_gain() {
        let left = map_sample(Some(&sample_at([0.2, 0.5], [0.2, 0.4])));
        let right = map_sample(Some(&sample_at([0.8, 0.5], [0.8, 0.4])));
        assert!(left.rotation_rate > 0.0);
        assert!(right.rotation_rate < 0.0);
        assert!((left.rotation_rate - 0.3 * ROTATION_GAIN).abs() < 1e-6);
    }

    #[test]
    fn tilt_and_zoom_clamp_to_the_unit_interval() {
        // Oversized span: hand right against the lens, fully zoomed in.
        let high = map_sample(Some(&sample_at([0.5, 1.4], [0.5, 0.9])));
        assert_eq!(high.tilt, Some(1.0));
        assert_eq!(high.zoom, Some(0.0));

        // Degenerate: coincident landmarks give zero span, fully out.
        let flat = map_sample(Some(&sample_at([0.5, 0.5], [0.5, 0.5])));
        assert_eq!(flat.zoom, Some(1.0));
        assert!(flat.zoom.unwrap().is_finite());
    }

    #[test]
    fn larger_hand_span_gives_a_smaller_zoom_value() {
        let near = map_sample(Some(&sample_at([0.5, 0.5], [0.5, 0.5 - HAND_SPAN_NEAR])));
        let far = map_sample(Some(&sample_at([0.5, 0.5], [0.5, 0.5 - HAND_SPAN_FAR])));
        assert_eq!(near.zoom, Some(0.0));
        assert_eq!(far.zoom, Some(1.0));
    }

    #[test]
    fn pose_commands_respect_the_confidence_threshold() {
        let mut sample = sample_at([0.5, 0.5], [0.5, 0.4]);
        sample.label = Some(POSE_SCATTER.to_string());
        sample.confidence = POSE_CONFIDENCE_THRESHOLD - 0.05;
        assert_eq!(map_sample(Some(&sample)).command, None);

        sample.confidence = POSE_CONFIDENCE_THRESHOLD;
        assert_eq!(map_sample(Some(&sample)).command, Some(PoseCommand::Scatter));

        sample.label = Some(POSE_GATHER.to_string());
        assert_eq!(map_sample(Some(&sample)).command, Some(PoseCommand::Gather));

        sample.label = Some("Thumb_Up".to_string());
        assert_eq!(map_sample(Some(&sample)).command, None);
    }

    #[test]
    fn alternating_presence_zeroes_rotation_on_loss() {
        let present = sample_at([0.1, 0.5], [0.1, 0.35]);
        let absent = GestureSample::absent(2.0);

        let moving = map_sample(Some(&present));
        assert!(moving.rotation_rate.abs() > 0.0);

        let stopped = map_sample(Some(&absent));
        assert_eq!(stopped.rotation_rate, 0.0);
        assert!(stopped.tilt.is_none() && stopped.zoom.is_none());
    }

    #[test]
    fn zoom_to_distance_spans_the_orbit_band() {
        assert_eq!(zoom_to_distance(0.0), DISTANCE_MIN);
        assert_eq!(zoom_to_distance(1.0), DISTANCE_MAX);
        let mid = zoom_to_distance(0.5);
        assert!(mid > DISTANCE_MIN && mid < DISTANCE_MAX);
    }
}
