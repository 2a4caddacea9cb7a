use bevy::prelude::*;
use constants::motion::LIGHT_MAX_EMISSIVE;

use super::orchestrator::SceneArrangement;
use crate::engine::scene::entities::TreeLight;

/// Per-light flicker intensity at `elapsed` seconds, in [0, 1].
pub fn flicker_level(elapsed: f32, phase: f32, speed: f32) -> f32 {
    (elapsed * speed + phase).sin() * 0.5 + 0.5
}

/// Drives string-light emissive from each light's own sinusoid. The glow is
/// scaled to a visible range only while the tree is formed and forced to
/// zero while dispersed, so chaos mode reads as "off".
pub fn animate_lights(
    arrangement: Res<SceneArrangement>,
    time: Res<Time>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    lights: Query<(&TreeLight, &MeshMaterial3d<StandardMaterial>)>,
) {
    let elapsed = time.elapsed_secs();
    let formed = *arrangement == SceneArrangement::Formed;

    for (light, material_handle) in &lights {
        let Some(material) = materials.get_mut(&material_handle.0) else {
            continue;
        };
        let intensity = if formed {
            flicker_level(elapsed, light.flicker_phase, light.flicker_speed) * LIGHT_MAX_EMISSIVE
        } else {
            0.0
        };
        material.emissive = light.colour.to_linear() * intensity;
    }
}

#[cfg(test)]
mod tests {
    use super::flicker_level;

    #[test]
    fn flicker_stays_in_unit_range() {
        for step in 0..1000 {
            let t = step as f32 * 0.037;
            let level = flicker_level(t, 1.3, 2.7);
            assert!((0.0..=1.0).contains(&level));
        }
    }
}
