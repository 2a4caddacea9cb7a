use bevy::prelude::*;

use crate::engine::scene::entities::{GiftProp, Spin};

/// Decorative props free-spin on all three axes in both arrangements; only
/// their position responds to the scene state.
pub fn animate_props(
    time: Res<Time>,
    mut props: Query<(&Spin, &mut Transform), With<GiftProp>>,
) {
    let delta = time.delta_secs();
    for (spin, mut transform) in &mut props {
        let step = Quat::from_euler(
            EulerRot::XYZ,
            spin.speed.x * delta,
            spin.speed.y * delta,
            spin.speed.z * delta,
        );
        transform.rotation = (transform.rotation * step).normalize();
    }
}
