use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States, Resource)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Component)]
pub struct FpsText;

/// Set by the scene spawn systems once every entity class and the foliage
/// buffer exist.
#[derive(Resource, Default)]
pub struct SceneReady {
    pub entities_spawned: bool,
    pub foliage_spawned: bool,
}

pub fn transition_to_running(
    scene_ready: Res<SceneReady>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if scene_ready.entities_spawned && scene_ready.foliage_spawned {
        info!("Scene constructed, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
