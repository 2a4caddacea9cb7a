use bevy::prelude::*;
use constants::layout::*;
use constants::palette::*;
use rand::Rng;
use std::f32::consts::TAU;

/// Shared motion attributes every animated entity carries, randomised once
/// at creation and immutable afterwards.
#[derive(Debug, Clone, Copy)]
pub struct MotionSeed {
    pub dispersed: Vec3,
    pub formed: Vec3,
    pub weight: f32,
    pub spin: Vec3,
    pub wobble_phase: Vec2,
    pub wobble_speed: Vec2,
    pub chaos_orientation: Quat,
}

#[derive(Debug, Clone)]
pub struct OrnamentSeed {
    pub motion: MotionSeed,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropShape {
    Box,
    Sphere,
    Cylinder,
}

#[derive(Debug, Clone)]
pub struct PropSeed {
    pub motion: MotionSeed,
    pub shape: PropShape,
    pub scale: f32,
    pub colour: Color,
}

#[derive(Debug, Clone)]
pub struct LightSeed {
    pub motion: MotionSeed,
    pub colour: Color,
    pub flicker_phase: f32,
    pub flicker_speed: f32,
}

/// Static per-point buffers for the foliage cloud. Built once and uploaded
/// to the GPU; never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct FoliageSeed {
    pub dispersed: Vec<Vec3>,
    pub formed: Vec<Vec3>,
    /// xyz: per-point turbulence offset seed, w: sprite size factor.
    pub jitter: Vec<Vec4>,
}

/// Cone-silhouette law shared by every formed layout: the allowed radius at
/// normalized height `t` in [0, 1], `TREE_BASE_RADIUS` at the base shrinking
/// linearly to 0 at the apex.
pub fn cone_radius(t: f32) -> f32 {
    TREE_BASE_RADIUS * (1.0 - t.clamp(0.0, 1.0))
}

/// World position of the focal emblem, just above the cone apex.
pub fn emblem_position() -> Vec3 {
    Vec3::new(0.0, TREE_HEIGHT * 0.5 + EMBLEM_APEX_OFFSET, 0.0)
}

fn sample_cube(rng: &mut impl Rng, half_extent: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-half_extent..half_extent),
        rng.gen_range(-half_extent..half_extent),
        rng.gen_range(-half_extent..half_extent),
    )
}

fn sample_ball(rng: &mut impl Rng, radius: f32) -> Vec3 {
    let azimuth = rng.gen_range(0.0..TAU);
    let cos_polar = rng.gen_range(-1.0f32..1.0);
    let sin_polar = (1.0 - cos_polar * cos_polar).sqrt();
    // Cube root keeps the radial density uniform over the ball volume.
    let r = radius * rng.gen_range(0.0f32..1.0).cbrt();
    Vec3::new(
        r * sin_polar * azimuth.cos(),
        r * cos_polar,
        r * sin_polar * azimuth.sin(),
    )
}

/// Formed position on the cone surface, pushed out by a class-specific
/// offset so mounted entities never clip into the foliage.
fn sample_cone_surface(rng: &mut impl Rng, surface_offset: f32) -> Vec3 {
    let y = rng.gen_range(-TREE_HEIGHT * 0.5..TREE_HEIGHT * 0.5);
    let t = (y + TREE_HEIGHT * 0.5) / TREE_HEIGHT;
    let radius = cone_radius(t) + surface_offset;
    let azimuth = rng.gen_range(0.0..TAU);
    Vec3::new(radius * azimuth.cos(), y, radius * azimuth.sin())
}

/// Formed position inside the cone volume, for the foliage interior fill.
fn sample_cone_interior(rng: &mut impl Rng) -> Vec3 {
    let y = rng.gen_range(-TREE_HEIGHT * 0.5..TREE_HEIGHT * 0.5);
    let t = (y + TREE_HEIGHT * 0.5) / TREE_HEIGHT;
    let radius = rng.gen_range(0.0..=cone_radius(t));
    let azimuth = rng.gen_range(0.0..TAU);
    Vec3::new(radius * azimuth.cos(), y, radius * azimuth.sin())
}

fn sample_motion(rng: &mut impl Rng, dispersed: Vec3, formed: Vec3) -> MotionSeed {
    MotionSeed {
        dispersed,
        formed,
        weight: rng.gen_range(0.5..1.5),
        spin: Vec3::new(
            rng.gen_range(-1.2..1.2),
            rng.gen_range(-1.2..1.2),
            rng.gen_range(-1.2..1.2),
        ),
        wobble_phase: Vec2::new(rng.gen_range(0.0..TAU), rng.gen_range(0.0..TAU)),
        wobble_speed: Vec2::new(rng.gen_range(0.8..2.2), rng.gen_range(0.8..2.2)),
        chaos_orientation: Quat::from_euler(
            EulerRot::XYZ,
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
        ),
    }
}

pub fn generate_ornaments(rng: &mut impl Rng, count: usize) -> Vec<OrnamentSeed> {
    (0..count)
        .map(|_| {
            let dispersed = sample_cube(rng, ORNAMENT_CHAOS_EXTENT);
            let formed = sample_cone_surface(rng, ORNAMENT_SURFACE_OFFSET);
            let scale = if rng.gen_bool(0.2) {
                2.2
            } else {
                rng.gen_range(0.8..1.4)
            };
            OrnamentSeed {
                motion: sample_motion(rng, dispersed, formed),
                scale,
            }
        })
        .collect()
}

pub fn generate_props(rng: &mut impl Rng, count: usize) -> Vec<PropSeed> {
    (0..count)
        .map(|i| {
            let dispersed = sample_cube(rng, PROP_CHAOS_EXTENT);
            let formed = sample_cone_surface(rng, PROP_SURFACE_OFFSET);
            let (shape, scale, colour) = match i % 3 {
                0 => (
                    PropShape::Box,
                    rng.gen_range(0.9..1.6),
                    BOX_PALETTE[rng.gen_range(0..BOX_PALETTE.len())],
                ),
                1 => (
                    PropShape::Sphere,
                    rng.gen_range(0.5..1.1),
                    BAUBLE_PALETTE[rng.gen_range(0..BAUBLE_PALETTE.len())],
                ),
                _ => (
                    PropShape::Cylinder,
                    rng.gen_range(0.6..1.2),
                    CANE_PALETTE[rng.gen_range(0..CANE_PALETTE.len())],
                ),
            };
            PropSeed {
                motion: sample_motion(rng, dispersed, formed),
                shape,
                scale,
                colour,
            }
        })
        .collect()
}

pub fn generate_lights(rng: &mut impl Rng, count: usize) -> Vec<LightSeed> {
    (0..count)
        .map(|_| {
            let dispersed = sample_cube(rng, PROP_CHAOS_EXTENT);
            let formed = sample_cone_surface(rng, LIGHT_SURFACE_OFFSET);
            LightSeed {
                motion: sample_motion(rng, dispersed, formed),
                colour: LIGHT_PALETTE[rng.gen_range(0..LIGHT_PALETTE.len())],
                flicker_phase: rng.gen_range(0.0..TAU),
                flicker_speed: rng.gen_range(1.5..4.0),
            }
        })
        .collect()
}

pub fn generate_foliage(rng: &mut impl Rng, count: usize) -> FoliageSeed {
    let mut seed = FoliageSeed {
        dispersed: Vec::with_capacity(count),
        formed: Vec::with_capacity(count),
        jitter: Vec::with_capacity(count),
    };
    for _ in 0..count {
        seed.dispersed.push(sample_ball(rng, FOLIAGE_CHAOS_RADIUS));
        seed.formed.push(sample_cone_interior(rng));
        seed.jitter.push(Vec4::new(
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.5..1.5),
        ));
    }
    seed
}
