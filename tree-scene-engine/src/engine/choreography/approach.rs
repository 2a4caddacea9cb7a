use bevy::prelude::*;

/// Per-frame interpolation factor for the linear-lerp entity classes.
/// Clamped to 1 so an oversized frame delta lands exactly on the target
/// instead of overshooting past it.
pub fn step_factor(delta: f32, rate: f32, weight: f32) -> f32 {
    (delta * rate * weight).clamp(0.0, 1.0)
}

/// One low-pass step toward `target`. Repeated application converges
/// without ever leaving the segment between the two endpoints.
pub fn lerp_toward(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    current.lerp(target, factor.clamp(0.0, 1.0))
}

/// Critically damped scalar approach: decay rate proportional to the
/// remaining distance, no overshoot for any `delta`.
pub fn exp_damp(current: f32, target: f32, rate: f32, delta: f32) -> f32 {
    current + (target - current) * (1.0 - (-rate * delta.max(0.0)).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::placement::{generate_foliage, generate_ornaments};
    use constants::layout::{
        FOLIAGE_CHAOS_RADIUS, ORNAMENT_CHAOS_EXTENT, ORNAMENT_SURFACE_OFFSET, TREE_BASE_RADIUS,
    };
    use constants::motion::{CHAOS_APPROACH_RATE, FORM_APPROACH_RATE};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn repeated_steps_converge_without_overshoot() {
        let start = Vec3::new(-40.0, 25.0, 18.0);
        let target = Vec3::new(3.0, -8.0, 1.0);
        let segment = target - start;
        let mut current = start;

        for _ in 0..2000 {
            let next = lerp_toward(current, target, step_factor(1.0 / 120.0, 1.5, 1.3));
            // Interpolation parameter along the segment must stay in [0, 1]
            // and never decrease.
            let s = (next - start).dot(segment) / segment.length_squared();
            assert!((0.0..=1.0 + 1e-5).contains(&s));
            assert!((next - target).length() <= (current - target).length());
            current = next;
        }
        assert!((current - target).length() < 1e-3);
    }

    #[test]
    fn oversized_delta_lands_on_target_exactly() {
        let current = Vec3::splat(50.0);
        let target = Vec3::ZERO;
        let next = lerp_toward(current, target, step_factor(10.0, 2.0, 2.0));
        assert_eq!(next, target);
    }

    #[test]
    fn exp_damp_never_crosses_the_target() {
        let mut value = 0.0;
        for _ in 0..500 {
            value = exp_damp(value, 1.0, 2.0, 1.0 / 60.0);
            assert!(value <= 1.0);
        }
        assert!((value - 1.0).abs() < 1e-3);

        // A pathological delta still cannot overshoot.
        assert!(exp_damp(0.0, 1.0, 2.0, 1e6) <= 1.0);
        assert!(exp_damp(0.0, 1.0, 2.0, -5.0) >= 0.0);
    }

    /// 300 ornaments and 15k foliage points flipping
    /// Chaos/Formed/Chaos/Formed with one-second holds must never leave
    /// the union of the two bounding volumes.
    #[test]
    fn state_flip_scenario_stays_inside_the_union_of_volumes() {
        let mut rng = StdRng::seed_from_u64(99);
        let ornaments = generate_ornaments(&mut rng, 300);
        let foliage = generate_foliage(&mut rng, 15_000);

        let mut ornament_positions: Vec<Vec3> =
            ornaments.iter().map(|s| s.motion.dispersed).collect();
        let mut foliage_progress = 0.0f32;

        let delta = 1.0 / 60.0;
        let holds = [true, false, true, false]; // formed?
        for formed in holds {
            for _ in 0..60 {
                for (pos, seed) in ornament_positions.iter_mut().zip(&ornaments) {
                    let (target, factor) = if formed {
                        (
                            seed.motion.formed,
                            step_factor(delta, FORM_APPROACH_RATE, seed.motion.weight),
                        )
                    } else {
                        (
                            seed.motion.dispersed,
                            step_factor(delta, CHAOS_APPROACH_RATE, 1.0),
                        )
                    };
                    *pos = lerp_toward(*pos, target, factor);

                    let inside_cube = pos.abs().max_element()
                        <= ORNAMENT_CHAOS_EXTENT + TREE_BASE_RADIUS + ORNAMENT_SURFACE_OFFSET;
                    assert!(inside_cube, "ornament escaped the union of volumes");
                }
                foliage_progress =
                    exp_damp(foliage_progress, if formed { 1.0 } else { 0.0 }, 1.25, delta);
                assert!((0.0..=1.0).contains(&foliage_progress));
            }
        }

        // Foliage endpoints themselves are inside their volumes; progress in
        // [0,1] keeps every interpolated point inside the convex hull union.
        for (d, f) in foliage.dispersed.iter().zip(&foliage.formed) {
            let blend = d.lerp(*f, foliage_progress);
            assert!(blend.length() <= FOLIAGE_CHAOS_RADIUS + TREE_BASE_RADIUS * 2.0 + 20.0);
        }
    }
}
