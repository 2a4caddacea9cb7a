use bevy::input::mouse::MouseScrollUnit;
use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
};
use constants::gesture::{
    DISTANCE_BAND, DISTANCE_MAX, DISTANCE_MIN, POLAR_MAX, POLAR_MIN,
};
use constants::layout::TREE_HEIGHT;
use constants::motion::{AUTO_ROTATE_SPEED, CAMERA_DAMP_RATE};

use crate::engine::choreography::approach::exp_damp;
use crate::engine::choreography::orchestrator::{SceneArrangement, SceneCommand};
use crate::gesture::mapper::{self, PoseCommand};
use crate::gesture::pipeline::GestureInput;

#[derive(Resource)]
pub struct OrbitCameraState {
    pub focus: Vec3,
    /// Heading around the vertical axis, radians.
    pub azimuth: f32,
    /// Angle from vertical, radians; damped toward `target_polar`.
    pub polar: f32,
    pub target_polar: f32,
    pub distance: f32,
    pub target_distance: f32,
    /// Band the damped distance is pinned inside this frame.
    pub min_distance: f32,
    pub max_distance: f32,
    pub dragging: bool,
}

impl Default for OrbitCameraState {
    fn default() -> Self {
        Self {
            focus: Vec3::new(0.0, TREE_HEIGHT * 0.45, 0.0),
            azimuth: 0.0,
            polar: 1.1,
            target_polar: 1.1,
            distance: 60.0,
            target_distance: 60.0,
            min_distance: DISTANCE_MIN,
            max_distance: DISTANCE_MAX,
            dragging: false,
        }
    }
}

/// Map a normalised tilt in [0, 1] onto the polar band. Tilt 0 (hand at
/// the top of the frame) looks down from above.
pub fn tilt_to_polar(tilt: f32) -> f32 {
    POLAR_MIN + tilt.clamp(0.0, 1.0) * (POLAR_MAX - POLAR_MIN)
}

/// Spherical position of the camera around the focus point.
pub fn orbit_position(focus: Vec3, azimuth: f32, polar: f32, distance: f32) -> Vec3 {
    let offset = Vec3::new(
        distance * polar.sin() * azimuth.sin(),
        distance * polar.cos(),
        distance * polar.sin() * azimuth.cos(),
    );
    focus + offset
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCameraState>,
    gesture_input: Res<GestureInput>,
    arrangement: Res<SceneArrangement>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    mut scene_commands: EventWriter<SceneCommand>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };
    let delta = time.delta_secs();

    let sample = gesture_input.0.latest();
    let control = mapper::map_sample(sample.as_ref());

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y * 1.0,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }

    if control.hand_present {
        orbit.azimuth += control.rotation_rate * delta;
        if let Some(tilt) = control.tilt {
            orbit.target_polar = tilt_to_polar(tilt);
        }
        if let Some(zoom) = control.zoom {
            orbit.target_distance = mapper::zoom_to_distance(zoom);
        }
        if let Some(command) = control.command {
            scene_commands.write(SceneCommand(match command {
                PoseCommand::Scatter => SceneArrangement::Chaos,
                PoseCommand::Gather => SceneArrangement::Formed,
            }));
        }
    } else {
        orbit.min_distance = DISTANCE_MIN;
        orbit.max_distance = DISTANCE_MAX;

        // Pointer fallback: drag to orbit, wheel to zoom.
        orbit.dragging = mouse_button.pressed(MouseButton::Left);
        if orbit.dragging && mouse_delta != Vec2::ZERO {
            orbit.azimuth -= mouse_delta.x * 0.005;
            orbit.target_polar =
                (orbit.target_polar - mouse_delta.y * 0.004).clamp(POLAR_MIN, POLAR_MAX);
        }
        if scroll_accum.abs() > f32::EPSILON {
            orbit.target_distance = (orbit.target_distance - scroll_accum * 3.0)
                .clamp(orbit.min_distance, orbit.max_distance);
        }

        // Idle drift once the tree is formed, unless the user is dragging.
        if *arrangement == SceneArrangement::Formed && !orbit.dragging {
            orbit.azimuth += AUTO_ROTATE_SPEED * delta;
        }
    }

    orbit.polar = exp_damp(orbit.polar, orbit.target_polar, CAMERA_DAMP_RATE, delta)
        .clamp(POLAR_MIN, POLAR_MAX);
    let damped = exp_damp(
        orbit.distance,
        orbit.target_distance,
        CAMERA_DAMP_RATE,
        delta,
    );
    orbit.distance = damped.clamp(DISTANCE_MIN, DISTANCE_MAX);
    if control.hand_present {
        // The band follows the damped value, so wheel input cannot fight
        // the hand while the approach itself stays smooth.
        orbit.min_distance = (orbit.distance - DISTANCE_BAND * 0.5).max(DISTANCE_MIN);
        orbit.max_distance = (orbit.distance + DISTANCE_BAND * 0.5).min(DISTANCE_MAX);
    }

    camera_transform.translation =
        orbit_position(orbit.focus, orbit.azimuth, orbit.polar, orbit.distance);
    camera_transform.look_at(orbit.focus, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::sample::GestureSample;
    use constants::gesture::{HAND_SPAN_NEAR, MIDDLE_FINGER_MCP};
    use std::time::Duration;

    fn controller_app() -> App {
        let mut app = App::new();
        app.init_resource::<OrbitCameraState>()
            .init_resource::<Time>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<SceneArrangement>()
            .insert_resource(GestureInput::default())
            .add_event::<SceneCommand>()
            .add_event::<MouseMotion>()
            .add_event::<MouseWheel>()
            .add_systems(Update, camera_controller);
        app.world_mut().spawn((Camera3d::default(), Transform::default()));
        app
    }

    fn step(app: &mut App, millis: u64) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(millis));
        app.update();
    }

    /// Centred near hand: zoom target at the close bound, no rotation.
    fn near_hand_sample() -> GestureSample {
        let mut landmarks = vec![[0.5, 0.5]; 21];
        landmarks[MIDDLE_FINGER_MCP] = [0.5, 0.5 - HAND_SPAN_NEAR];
        GestureSample {
            timestamp: 0.0,
            landmarks: Some(landmarks),
            label: None,
            confidence: 0.0,
            hand_present: true,
        }
    }

    #[test]
    fn gesture_zoom_damps_the_distance_instead_of_snapping() {
        let mut app = controller_app();
        {
            let mut orbit = app.world_mut().resource_mut::<OrbitCameraState>();
            orbit.distance = DISTANCE_MAX;
            orbit.target_distance = DISTANCE_MAX;
        }
        app.world()
            .resource::<GestureInput>()
            .0
            .publish(near_hand_sample());

        // One 16ms frame at damp rate 4 moves a few units at most.
        step(&mut app, 16);
        let after_one = app.world().resource::<OrbitCameraState>().distance;
        assert!(
            after_one > DISTANCE_MAX - 6.0,
            "distance snapped to {after_one} in one frame"
        );
        assert!(after_one < DISTANCE_MAX);

        // Held long enough, the approach converges onto the close bound.
        let mut previous = after_one;
        for _ in 0..600 {
            step(&mut app, 16);
            let distance = app.world().resource::<OrbitCameraState>().distance;
            assert!(distance <= previous + 1e-4, "distance moved away from target");
            previous = distance;
        }
        assert!((previous - DISTANCE_MIN).abs() < 0.5);
    }

    #[test]
    fn tilt_maps_onto_the_polar_band_and_clamps() {
        assert_eq!(tilt_to_polar(0.0), POLAR_MIN);
        assert_eq!(tilt_to_polar(1.0), POLAR_MAX);
        assert_eq!(tilt_to_polar(-3.0), POLAR_MIN);
        assert_eq!(tilt_to_polar(7.0), POLAR_MAX);
        let mid = tilt_to_polar(0.5);
        assert!(mid > POLAR_MIN && mid < POLAR_MAX);
    }

    #[test]
    fn orbit_position_sits_at_the_requested_distance() {
        let focus = Vec3::new(0.0, 14.0, 0.0);
        for azimuth in [0.0, 1.3, 4.0] {
            let position = orbit_position(focus, azimuth, 1.1, 60.0);
            assert!((position.distance(focus) - 60.0).abs() < 1e-3);
        }
    }

    #[test]
    fn polar_extremes_keep_the_camera_off_the_vertical_axis() {
        let focus = Vec3::ZERO;
        let top = orbit_position(focus, 0.0, POLAR_MIN, 50.0);
        let low = orbit_position(focus, 0.0, POLAR_MAX, 50.0);
        // Neither bound is exactly on the pole, so look_at stays stable.
        assert!(Vec2::new(top.x, top.z).length() > 1.0);
        assert!(low.y.abs() < top.y);
    }
}
