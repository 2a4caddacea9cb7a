use bevy::prelude::*;
use constants::motion::{CHAOS_APPROACH_RATE, FORM_APPROACH_RATE};

use super::approach::{lerp_toward, step_factor};
use crate::engine::scene::entities::Choreographed;

/// The two global scene arrangements. Broadcast to every animator as an
/// immutable value each frame; mutated only by an explicit command.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SceneArrangement {
    #[default]
    Chaos,
    Formed,
}

impl SceneArrangement {
    pub fn toggled(self) -> Self {
        match self {
            SceneArrangement::Chaos => SceneArrangement::Formed,
            SceneArrangement::Formed => SceneArrangement::Chaos,
        }
    }
}

/// One-shot scene-state command. Assignment semantics: applying the current
/// arrangement again is a no-op, so a held pose never flaps the scene.
#[derive(Event, Debug, Clone, Copy)]
pub struct SceneCommand(pub SceneArrangement);

pub fn apply_scene_commands(
    mut commands: EventReader<SceneCommand>,
    mut arrangement: ResMut<SceneArrangement>,
) {
    for SceneCommand(requested) in commands.read() {
        if *arrangement != *requested {
            info!("Scene arrangement -> {:?}", requested);
            *arrangement = *requested;
        }
    }
}

/// Keyboard fallback for hosts without a gesture stream.
pub fn keyboard_arrangement_toggle(
    keyboard: Res<ButtonInput<KeyCode>>,
    arrangement: Res<SceneArrangement>,
    mut commands: EventWriter<SceneCommand>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        commands.write(SceneCommand(arrangement.toggled()));
    }
}

/// Advances every choreographed entity toward the active target layout.
/// Formed motion is weighted per entity; dispersing uses the flat rate so
/// the scatter reads as one burst.
pub fn advance_choreographed(
    arrangement: Res<SceneArrangement>,
    time: Res<Time>,
    mut entities: Query<(&Choreographed, &mut Transform)>,
) {
    let delta = time.delta_secs();
    for (choreo, mut transform) in &mut entities {
        let (target, factor) = match *arrangement {
            SceneArrangement::Formed => (
                choreo.formed,
                step_factor(delta, FORM_APPROACH_RATE, choreo.weight),
            ),
            SceneArrangement::Chaos => (
                choreo.dispersed,
                step_factor(delta, CHAOS_APPROACH_RATE, 1.0),
            ),
        };
        transform.translation = lerp_toward(transform.translation, target, factor);
    }
}
