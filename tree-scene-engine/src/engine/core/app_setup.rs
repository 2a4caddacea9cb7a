use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;

// Crate engine modules
use crate::engine::camera::orbit_camera::{
    OrbitCameraState, camera_controller, orbit_position,
};
use crate::engine::choreography::{
    emblem::animate_emblem,
    lights::animate_lights,
    orchestrator::{
        SceneArrangement, SceneCommand, advance_choreographed, apply_scene_commands,
        keyboard_arrangement_toggle,
    },
    ornaments::animate_ornaments,
    props::animate_props,
};
use crate::engine::foliage::{
    material::FoliageMaterial,
    progress::{
        FoliageProgress, advance_foliage_progress, spawn_foliage, update_foliage_material,
    },
};
use crate::engine::scene::{
    entities::spawn_scene_entities,
    photo_set::{PhotoSet, assign_ornament_textures},
};
use crate::engine::systems::fps_tracking::{
    fps_notification_system, tracker_status_notification_system,
};

// Gesture and RPC modules
use crate::gesture::pipeline::{GestureInput, TrackerStatusChannel};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::gesture::pipeline::{GestureRuntime, apply_gesture_control};

// Transitions
use crate::engine::core::app_state::{AppState, FpsText, SceneReady, transition_to_running};
use crate::engine::core::window_config::create_window_config;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(MaterialPlugin::<FoliageMaterial>::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(WebRpcPlugin);

    // Initialise resources early. The gesture slots are built here so the
    // native capture runtime shares them with the render-side readers.
    let gesture_input = GestureInput::default();
    let tracker_status = TrackerStatusChannel::default();

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.insert_resource(GestureRuntime::new(
            gesture_input.0.clone(),
            tracker_status.0.clone(),
        ));
        app.add_systems(Update, apply_gesture_control);
    }

    app.init_resource::<SceneReady>()
        .init_resource::<SceneArrangement>()
        .init_resource::<FoliageProgress>()
        .init_resource::<OrbitCameraState>()
        .insert_resource(gesture_input)
        .insert_resource(tracker_status)
        .init_resource::<PhotoSet>()
        .add_event::<SceneCommand>();

    // State-based system scheduling
    app.add_systems(Startup, setup).add_systems(
        Update,
        (spawn_scene_entities, spawn_foliage, transition_to_running)
            .chain()
            .run_if(in_state(AppState::Loading)),
    );

    // Base runtime systems that run on all platforms.
    let runtime_systems = (
        // Arrangement commands resolve before anything moves this frame.
        keyboard_arrangement_toggle,
        apply_scene_commands,
        // Entity choreography
        advance_choreographed,
        animate_ornaments,
        animate_props,
        animate_lights,
        animate_emblem,
        // Foliage cloud
        advance_foliage_progress,
        update_foliage_material,
        // Camera and host-facing systems
        camera_controller,
        assign_ornament_textures,
        fps_notification_system,
        tracker_status_notification_system,
    )
        .chain();

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 6_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
    // Faint fill so dispersed pieces never go fully black.
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.6, 0.7, 0.9),
        brightness: 120.0,
        ..default()
    });
}

fn spawn_orbit_camera(commands: &mut Commands) {
    let orbit = OrbitCameraState::default();
    let position = orbit_position(orbit.focus, orbit.azimuth, orbit.polar, orbit.distance);
    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.01, 0.015, 0.04)),
            ..default()
        },
        Transform::from_translation(position).looking_at(orbit.focus, Vec3::Y),
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);
    spawn_orbit_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
