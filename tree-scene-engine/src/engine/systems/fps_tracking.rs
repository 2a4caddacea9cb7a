use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::engine::core::app_state::FpsText;
use crate::gesture::pipeline::{TrackerStatus, TrackerStatusChannel};
use crate::rpc::web_rpc::WebRpcInterface;

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    // Send FPS every 0.5 seconds
    if current_time - *last_send_time >= 0.5 {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                rpc_interface.send_notification(
                    "fps_update",
                    serde_json::json!({
                        "fps": value as f32
                    }),
                );
                *last_send_time = current_time;
            }
        }
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                text.0 = format!("FPS: {value:.1}");
            }
        }
    }
}

/// Forward tracker status changes to the host. The slot always holds the
/// latest status; only a change is worth a notification.
pub fn tracker_status_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    tracker_status: Res<TrackerStatusChannel>,
    mut last_sent: Local<Option<TrackerStatus>>,
) {
    let Some(status) = tracker_status.0.latest() else {
        return;
    };
    if last_sent.as_ref() == Some(&status) {
        return;
    }

    rpc_interface.send_notification(
        "tracker_status",
        serde_json::json!({
            "status": status.to_string()
        }),
    );
    *last_sent = Some(status);
}
