use bevy::prelude::*;
use constants::motion::{EMBLEM_SCALE_RATE, EMBLEM_SPIN_SPEED};

use super::approach::exp_damp;
use super::orchestrator::SceneArrangement;
use crate::engine::scene::entities::Emblem;

/// The focal emblem never moves; its scale is exponentially damped toward 1
/// while formed and 0 while dispersed, and it spins at a constant rate in
/// both arrangements.
pub fn animate_emblem(
    arrangement: Res<SceneArrangement>,
    time: Res<Time>,
    mut emblems: Query<&mut Transform, With<Emblem>>,
) {
    let delta = time.delta_secs();
    let target = match *arrangement {
        SceneArrangement::Formed => 1.0,
        SceneArrangement::Chaos => 0.0,
    };

    for mut transform in &mut emblems {
        let scale = exp_damp(transform.scale.x, target, EMBLEM_SCALE_RATE, delta);
        transform.scale = Vec3::splat(scale.clamp(0.0, 1.0));
        transform.rotation =
            (transform.rotation * Quat::from_rotation_y(EMBLEM_SPIN_SPEED * delta)).normalize();
    }
}
