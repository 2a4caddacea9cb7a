use bevy::prelude::*;
use constants::layout::*;
use constants::palette::*;
use rand::thread_rng;

use super::placement::{
    self, LightSeed, MotionSeed, OrnamentSeed, PropSeed, PropShape, generate_lights,
    generate_ornaments, generate_props,
};
use crate::engine::core::app_state::SceneReady;

/// Positional choreography state shared by every mounted entity class.
/// Endpoints are immutable after generation; only the entity's `Transform`
/// translation moves, always on the segment between them.
#[derive(Component, Debug, Clone, Copy)]
pub struct Choreographed {
    pub dispersed: Vec3,
    pub formed: Vec3,
    pub weight: f32,
}

/// Per-entity free-spin angular speed, radians per second per axis.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spin {
    pub speed: Vec3,
}

/// Two-axis sinusoidal wobble applied to formed ornaments.
#[derive(Component, Debug, Clone, Copy)]
pub struct Wobble {
    pub phase: Vec2,
    pub speed: Vec2,
}

/// Photo ornament: `index` is the stable slot used for texture cycling.
/// It never changes when the photo set does, so in-flight animation is
/// untouched by photo swaps.
#[derive(Component, Debug)]
pub struct Ornament {
    pub index: usize,
}

#[derive(Component, Debug)]
pub struct GiftProp {
    pub shape: PropShape,
}

/// String light; emissive intensity is driven by a per-light sinusoid.
#[derive(Component, Debug)]
pub struct TreeLight {
    pub colour: Color,
    pub flicker_phase: f32,
    pub flicker_speed: f32,
}

/// Single focal emblem at the apex; scale animates instead of position.
#[derive(Component, Debug)]
pub struct Emblem;

impl From<&MotionSeed> for Choreographed {
    fn from(seed: &MotionSeed) -> Self {
        Self {
            dispersed: seed.dispersed,
            formed: seed.formed,
            weight: seed.weight,
        }
    }
}

pub fn spawn_scene_entities(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut scene_ready: ResMut<SceneReady>,
) {
    if scene_ready.entities_spawned {
        return;
    }

    let mut rng = thread_rng();
    let ornaments = generate_ornaments(&mut rng, ORNAMENT_COUNT);
    let props = generate_props(&mut rng, PROP_COUNT);
    let lights = generate_lights(&mut rng, LIGHT_COUNT);

    spawn_ornaments(&mut commands, &mut meshes, &mut materials, &ornaments);
    spawn_props(&mut commands, &mut meshes, &mut materials, &props);
    spawn_lights(&mut commands, &mut meshes, &mut materials, &lights);
    spawn_emblem(&mut commands, &mut meshes, &mut materials);

    info!(
        "Spawned {} ornaments, {} props, {} lights and the emblem",
        ornaments.len(),
        props.len(),
        lights.len()
    );
    scene_ready.entities_spawned = true;
}

fn spawn_ornaments(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    seeds: &[OrnamentSeed],
) {
    // One shared quad, one material per ornament so photos can differ.
    let quad = meshes.add(Rectangle::new(2.0, 2.0));
    for (index, seed) in seeds.iter().enumerate() {
        let material = materials.add(StandardMaterial {
            base_color: ORNAMENT_BORDER_COLOUR,
            unlit: false,
            double_sided: true,
            cull_mode: None,
            ..default()
        });
        commands.spawn((
            Mesh3d(quad.clone()),
            MeshMaterial3d(material),
            Transform {
                translation: seed.motion.dispersed,
                rotation: seed.motion.chaos_orientation,
                scale: Vec3::splat(seed.scale),
            },
            Choreographed::from(&seed.motion),
            Spin {
                speed: seed.motion.spin,
            },
            Wobble {
                phase: seed.motion.wobble_phase,
                speed: seed.motion.wobble_speed,
            },
            Ornament { index },
        ));
    }
}

fn spawn_props(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    seeds: &[PropSeed],
) {
    let box_mesh = meshes.add(Cuboid::new(1.4, 1.4, 1.4));
    let sphere_mesh = meshes.add(Sphere::new(0.8));
    let cylinder_mesh = meshes.add(Cylinder::new(0.25, 1.8));

    for seed in seeds {
        let mesh = match seed.shape {
            PropShape::Box => box_mesh.clone(),
            PropShape::Sphere => sphere_mesh.clone(),
            PropShape::Cylinder => cylinder_mesh.clone(),
        };
        let material = materials.add(StandardMaterial {
            base_color: seed.colour,
            perceptual_roughness: 0.35,
            ..default()
        });
        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform {
                translation: seed.motion.dispersed,
                rotation: seed.motion.chaos_orientation,
                scale: Vec3::splat(seed.scale),
            },
            Choreographed::from(&seed.motion),
            Spin {
                speed: seed.motion.spin,
            },
            GiftProp { shape: seed.shape },
        ));
    }
}

fn spawn_lights(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    seeds: &[LightSeed],
) {
    let bulb = meshes.add(Sphere::new(0.22));
    for seed in seeds {
        // Emissive starts at zero: chaos mode reads as "off".
        let material = materials.add(StandardMaterial {
            base_color: seed.colour,
            emissive: LinearRgba::BLACK,
            ..default()
        });
        commands.spawn((
            Mesh3d(bulb.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(seed.motion.dispersed),
            Choreographed::from(&seed.motion),
            TreeLight {
                colour: seed.colour,
                flicker_phase: seed.flicker_phase,
                flicker_speed: seed.flicker_speed,
            },
        ));
    }
}

fn spawn_emblem(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let material = materials.add(StandardMaterial {
        base_color: EMBLEM_COLOUR,
        emissive: EMBLEM_COLOUR.to_linear() * 4.0,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(1.2))),
        MeshMaterial3d(material),
        // Scale starts collapsed; the choreography drives it toward 1 in
        // the formed arrangement.
        Transform {
            translation: placement::emblem_position(),
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(0.0),
        },
        Emblem,
    ));
}
