use bevy::prelude::*;
use constants::motion::ORNAMENT_WOBBLE_AMPLITUDE;

use super::orchestrator::SceneArrangement;
use crate::engine::scene::entities::{Ornament, Spin, Wobble};

/// Ornament rotation behaviour. While dispersed every ornament tumbles
/// freely on all three axes; once the tree forms it turns to face radially
/// outward and slightly up, with a small per-entity wobble so the assembled
/// tree never looks frozen.
pub fn animate_ornaments(
    arrangement: Res<SceneArrangement>,
    time: Res<Time>,
    mut ornaments: Query<(&Spin, &Wobble, &mut Transform), With<Ornament>>,
) {
    let delta = time.delta_secs();
    let elapsed = time.elapsed_secs();

    for (spin, wobble, mut transform) in &mut ornaments {
        match *arrangement {
            SceneArrangement::Chaos => {
                let step = Quat::from_euler(
                    EulerRot::XYZ,
                    spin.speed.x * delta,
                    spin.speed.y * delta,
                    spin.speed.z * delta,
                );
                transform.rotation = (transform.rotation * step).normalize();
            }
            SceneArrangement::Formed => {
                let position = transform.translation;
                let outward = Vec3::new(position.x, 0.0, position.z).normalize_or_zero();
                // Look outward and a little up so photos read from below.
                let focus = position + outward * 4.0 + Vec3::Y * 2.0;
                let facing = Transform::from_translation(position)
                    .looking_at(focus, Vec3::Y)
                    .rotation;

                let wobble_x = (elapsed * wobble.speed.x + wobble.phase.x).sin()
                    * ORNAMENT_WOBBLE_AMPLITUDE;
                let wobble_y = (elapsed * wobble.speed.y + wobble.phase.y).sin()
                    * ORNAMENT_WOBBLE_AMPLITUDE;
                let target = facing * Quat::from_euler(EulerRot::XYZ, wobble_x, wobble_y, 0.0);

                // Damped re-orientation; no snap on the state flip.
                let blend = (delta * 4.0).min(1.0);
                transform.rotation = transform.rotation.slerp(target, blend);
            }
        }
    }
}
