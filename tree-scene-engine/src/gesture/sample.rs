use bevy::prelude::*;
use constants::gesture::{LANDMARK_COUNT, MIDDLE_FINGER_MCP, WRIST};
use serde::{Deserialize, Serialize};

/// One frame's worth of hand-tracking output: normalized 2-D landmarks, the
/// top gesture classification and a presence flag. Produced by the gesture
/// timeline at its own cadence, consumed most-recent-wins by the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureSample {
    pub timestamp: f64,
    /// 21 normalized image-space points, or absent when no hand was found.
    pub landmarks: Option<Vec<[f32; 2]>>,
    pub label: Option<String>,
    pub confidence: f32,
    pub hand_present: bool,
}

impl GestureSample {
    /// Sample representing "no hand in frame".
    pub fn absent(timestamp: f64) -> Self {
        Self {
            timestamp,
            landmarks: None,
            label: None,
            confidence: 0.0,
            hand_present: false,
        }
    }

    /// Landmarks, only if present, complete and finite. A malformed sample
    /// is treated exactly like an absent hand, never as an error.
    pub fn valid_landmarks(&self) -> Option<&[[f32; 2]]> {
        if !self.hand_present {
            return None;
        }
        let landmarks = self.landmarks.as_deref()?;
        if landmarks.len() != LANDMARK_COUNT {
            return None;
        }
        if landmarks
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite())
        {
            return None;
        }
        Some(landmarks)
    }

    pub fn wrist(&self) -> Option<Vec2> {
        self.valid_landmarks().map(|l| Vec2::from(l[WRIST]))
    }

    pub fn middle_finger_mcp(&self) -> Option<Vec2> {
        self.valid_landmarks()
            .map(|l| Vec2::from(l[MIDDLE_FINGER_MCP]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present_sample(landmarks: Vec<[f32; 2]>) -> GestureSample {
        GestureSample {
            timestamp: 0.0,
            landmarks: Some(landmarks),
            label: Some("Open_Palm".into()),
            confidence: 0.9,
            hand_present: true,
        }
    }

    #[test]
    fn malformed_samples_read_as_absent() {
        // Too few landmarks.
        assert!(present_sample(vec![[0.5, 0.5]; 7]).valid_landmarks().is_none());
        // Non-finite coordinate.
        let mut bad = vec![[0.5, 0.5]; 21];
        bad[3] = [f32::NAN, 0.2];
        assert!(present_sample(bad).valid_landmarks().is_none());
        // Missing landmark array entirely.
        assert!(GestureSample::absent(1.0).valid_landmarks().is_none());
    }

    #[test]
    fn wrist_and_mcp_read_the_documented_indices() {
        let mut landmarks = vec![[0.0, 0.0]; 21];
        landmarks[0] = [0.25, 0.75];
        landmarks[9] = [0.5, 0.5];
        let sample = present_sample(landmarks);
        assert_eq!(sample.wrist(), Some(Vec2::new(0.25, 0.75)));
        assert_eq!(sample.middle_finger_mcp(), Some(Vec2::new(0.5, 0.5)));
    }
}
