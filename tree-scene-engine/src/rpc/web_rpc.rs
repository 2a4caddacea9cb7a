use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::choreography::orchestrator::{SceneArrangement, SceneCommand};
use crate::engine::scene::photo_set::PhotoSet;
use crate::gesture::pipeline::{GestureControl, GestureInput, TrackerStatus, TrackerStatusChannel};
use crate::gesture::sample::GestureSample;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Resource managing bidirectional RPC communication with the host page.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the RPC layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .init_resource::<GestureControl>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue bridging the JS event callback and the
    // Bevy schedule.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Cheap pre-filter before the real JSON parse in the schedule.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping the thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut scene_commands: EventWriter<SceneCommand>,
    mut photo_set: ResMut<PhotoSet>,
    mut gesture_control: ResMut<GestureControl>,
    asset_server: Res<AssetServer>,
    gesture_input: Res<GestureInput>,
    tracker_status: Res<TrackerStatusChannel>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                let result = dispatch_rpc_method(
                    &request,
                    &diagnostics,
                    &mut scene_commands,
                    &mut photo_set,
                    &mut gesture_control,
                    &asset_server,
                    &gesture_input,
                    &tracker_status,
                );

                // Only requests carrying an id get a response; the rest are
                // notifications and run silently.
                if let Some(id) = request.id.clone() {
                    rpc_interface.queue_response(match result {
                        Ok(result_value) => RpcResponse {
                            jsonrpc: "2.0".to_string(),
                            result: Some(result_value),
                            error: None,
                            id: Some(id),
                        },
                        Err(error) => RpcResponse {
                            jsonrpc: "2.0".to_string(),
                            result: None,
                            error: Some(error),
                            id: Some(id),
                        },
                    });
                }
            }
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {parse_error}");
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn dispatch_rpc_method(
    request: &RpcRequest,
    diagnostics: &DiagnosticsStore,
    scene_commands: &mut EventWriter<SceneCommand>,
    photo_set: &mut PhotoSet,
    gesture_control: &mut GestureControl,
    asset_server: &AssetServer,
    gesture_input: &GestureInput,
    tracker_status: &TrackerStatusChannel,
) -> Result<serde_json::Value, RpcError> {
    match request.method.as_str() {
        "set_arrangement" => handle_set_arrangement(&request.params, scene_commands),
        "set_photo_set" => handle_set_photo_set(&request.params, photo_set, asset_server),
        "publish_gesture_sample" => {
            handle_publish_gesture_sample(&request.params, gesture_control, gesture_input)
        }
        "set_gesture_control" => handle_set_gesture_control(
            &request.params,
            gesture_control,
            gesture_input,
            tracker_status,
        ),
        "get_fps" => handle_get_fps(diagnostics),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError {
                code: -32601,
                message: "Method not found".to_string(),
                data: Some(serde_json::json!({"method": request.method})),
            })
        }
    }
}

fn handle_set_arrangement(
    params: &serde_json::Value,
    scene_commands: &mut EventWriter<SceneCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ArrangementParams {
        arrangement: String,
    }

    let arrangement_params = serde_json::from_value::<ArrangementParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'arrangement' parameter"))?;

    let arrangement = match arrangement_params.arrangement.as_str() {
        "chaos" => SceneArrangement::Chaos,
        "formed" => SceneArrangement::Formed,
        other => {
            return Err(RpcError::invalid_params(&format!(
                "Unknown arrangement: {other}"
            )));
        }
    };

    scene_commands.write(SceneCommand(arrangement));
    info!("Arrangement command dispatched: {arrangement:?}");

    Ok(serde_json::json!({
        "success": true,
        "arrangement": arrangement_params.arrangement
    }))
}

fn handle_set_photo_set(
    params: &serde_json::Value,
    photo_set: &mut PhotoSet,
    asset_server: &AssetServer,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct PhotoSetParams {
        urls: Vec<String>,
    }

    let photo_params = serde_json::from_value::<PhotoSetParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'urls' array"))?;

    photo_set.handles = photo_params
        .urls
        .iter()
        .map(|url| asset_server.load(url.as_str()))
        .collect();

    info!("Photo set replaced: {} images", photo_set.handles.len());

    Ok(serde_json::json!({
        "success": true,
        "count": photo_set.handles.len()
    }))
}

fn handle_publish_gesture_sample(
    params: &serde_json::Value,
    gesture_control: &GestureControl,
    gesture_input: &GestureInput,
) -> Result<serde_json::Value, RpcError> {
    let sample = serde_json::from_value::<GestureSample>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected a gesture sample"))?;

    // Samples arriving after set_gesture_control(false) are dropped so a
    // stale host stream cannot keep driving the camera.
    if !gesture_control.enabled {
        return Ok(serde_json::json!({"accepted": false}));
    }

    gesture_input.0.publish(sample);
    Ok(serde_json::json!({"accepted": true}))
}

fn handle_set_gesture_control(
    params: &serde_json::Value,
    gesture_control: &mut GestureControl,
    gesture_input: &GestureInput,
    tracker_status: &TrackerStatusChannel,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct GestureControlParams {
        enabled: bool,
    }

    let control_params = serde_json::from_value::<GestureControlParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'enabled' parameter"))?;

    gesture_control.enabled = control_params.enabled;
    if control_params.enabled {
        tracker_status.0.publish(TrackerStatus::Ready);
    } else {
        // Halt the camera on this very frame rather than letting a stale
        // sample keep it moving.
        gesture_input.0.clear();
        tracker_status.0.publish(TrackerStatus::CameraOff);
    }

    info!("Gesture control enabled: {}", control_params.enabled);

    Ok(serde_json::json!({
        "success": true,
        "enabled": control_params.enabled
    }))
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Responses second, preserving queue order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_request_round_trips_with_and_without_id() {
        let with_id = r#"{"jsonrpc":"2.0","method":"get_fps","params":{},"id":7}"#;
        let request: RpcRequest = serde_json::from_str(with_id).unwrap();
        assert_eq!(request.method, "get_fps");
        assert!(request.id.is_some());

        let notification =
            r#"{"jsonrpc":"2.0","method":"publish_gesture_sample","params":{"timestamp":1.0,"landmarks":null,"label":null,"confidence":0.0,"hand_present":false},"id":null}"#;
        let request: RpcRequest = serde_json::from_str(notification).unwrap();
        assert!(request.id.is_none());
        let sample: GestureSample = serde_json::from_value(request.params).unwrap();
        assert!(!sample.hand_present);
    }

    #[test]
    fn samples_published_while_control_is_disabled_are_dropped() {
        let control = GestureControl { enabled: false };
        let input = GestureInput::default();
        let params = serde_json::to_value(GestureSample {
            timestamp: 2.0,
            landmarks: Some(vec![[0.5, 0.5]; 21]),
            label: None,
            confidence: 0.0,
            hand_present: true,
        })
        .unwrap();

        let result = handle_publish_gesture_sample(&params, &control, &input).unwrap();
        assert_eq!(result["accepted"], false);
        // Nothing reaches the camera: the slot stays empty.
        assert!(input.0.latest().is_none());

        let control = GestureControl { enabled: true };
        let result = handle_publish_gesture_sample(&params, &control, &input).unwrap();
        assert_eq!(result["accepted"], true);
        assert!(input.0.latest().unwrap().hand_present);
    }

    #[test]
    fn error_responses_serialize_with_the_standard_code() {
        let error = RpcError::invalid_params("Expected 'urls' array");
        assert_eq!(error.code, -32602);
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["message"], "Expected 'urls' array");
    }
}
