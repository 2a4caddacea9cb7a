use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use constants::layout::FOLIAGE_POINT_COUNT;
use constants::motion::FOLIAGE_TIME_CONSTANT;
use constants::palette::FOLIAGE_BASE_COLOUR;
use rand::thread_rng;

use super::material::FoliageMaterial;
use super::point_mesh::create_foliage_point_mesh;
use crate::engine::choreography::approach::exp_damp;
use crate::engine::choreography::orchestrator::SceneArrangement;
use crate::engine::core::app_state::SceneReady;
use crate::engine::scene::placement::generate_foliage;

/// The single mutable scalar driving the whole foliage cloud, plus the
/// elapsed time fed to the turbulence. The GPU interpolates per point.
#[derive(Resource, Default)]
pub struct FoliageProgress {
    pub progress: f32,
    pub elapsed: f32,
}

#[derive(Resource)]
pub struct FoliageMaterialHandle(pub Handle<FoliageMaterial>);

/// Cubic in/out easing, mirrored on the GPU side; kept here so the curve is
/// testable off the render thread.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u * 0.5
    }
}

pub fn spawn_foliage(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<FoliageMaterial>>,
    mut scene_ready: ResMut<SceneReady>,
) {
    if scene_ready.foliage_spawned {
        return;
    }

    let mut rng = thread_rng();
    let seed = generate_foliage(&mut rng, FOLIAGE_POINT_COUNT);
    let mesh = create_foliage_point_mesh(&seed);
    let material = materials.add(FoliageMaterial::new(FOLIAGE_BASE_COLOUR));

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(material.clone()),
        Transform::IDENTITY,
        // The cloud spans both arrangements; its AABB is meaningless.
        NoFrustumCulling,
    ));
    commands.insert_resource(FoliageMaterialHandle(material));

    info!("Foliage cloud created: {} point sprites", FOLIAGE_POINT_COUNT);
    scene_ready.foliage_spawned = true;
}

/// Exponential decay toward the arrangement target. The approach speed is
/// proportional to the remaining distance, which desynchronises the cloud
/// from the linearly-lerped entities on purpose.
pub fn advance_foliage_progress(
    arrangement: Res<SceneArrangement>,
    time: Res<Time>,
    mut progress: ResMut<FoliageProgress>,
) {
    let target = match *arrangement {
        SceneArrangement::Formed => 1.0,
        SceneArrangement::Chaos => 0.0,
    };
    progress.progress = exp_damp(
        progress.progress,
        target,
        1.0 / FOLIAGE_TIME_CONSTANT,
        time.delta_secs(),
    )
    .clamp(0.0, 1.0);
    progress.elapsed += time.delta_secs();
}

/// The one GPU mutation per frame: refresh the small uniform set.
pub fn update_foliage_material(
    progress: Res<FoliageProgress>,
    handle: Option<Res<FoliageMaterialHandle>>,
    mut materials: ResMut<Assets<FoliageMaterial>>,
) {
    let Some(handle) = handle else {
        return;
    };
    let Some(material) = materials.get_mut(&handle.0) else {
        return;
    };
    material.params[0].x = progress.progress;
    material.params[0].y = progress.elapsed;
}
