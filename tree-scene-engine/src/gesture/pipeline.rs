use bevy::prelude::*;
use thiserror::Error;

use super::sample::GestureSample;
use super::slot::{SampleSlot, Slot};

/// Failure taxonomy for the gesture timeline. Acquisition failures are
/// terminal for the current enable-cycle; inference failures are not.
#[derive(Debug, Error)]
pub enum GestureError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("camera stream unavailable: {0}")]
    StreamUnavailable(String),
    #[error("model load failed: {0}")]
    ModelLoad(String),
    #[error("capture stream ended")]
    StreamEnded,
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Advisory status surfaced to the host UI; core behaviour never depends
/// on it being displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerStatus {
    Initializing,
    DownloadingModel,
    RequestingCamera,
    Ready,
    NoHand,
    Detected(String),
    CameraOff,
    Error(String),
}

impl std::fmt::Display for TrackerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerStatus::Initializing => write!(f, "INITIALIZING"),
            TrackerStatus::DownloadingModel => write!(f, "DOWNLOADING_MODEL"),
            TrackerStatus::RequestingCamera => write!(f, "REQUESTING_CAMERA"),
            TrackerStatus::Ready => write!(f, "READY"),
            TrackerStatus::NoHand => write!(f, "NO_HAND"),
            TrackerStatus::Detected(label) => write!(f, "DETECTED:{label}"),
            TrackerStatus::CameraOff => write!(f, "CAMERA_OFF"),
            TrackerStatus::Error(reason) => write!(f, "ERROR:{reason}"),
        }
    }
}

/// One captured video frame. Pixel interpretation belongs to the tracker.
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub timestamp: f64,
}

/// A hand found in one frame: 21 normalized landmarks plus the top
/// classified gesture.
pub struct HandDetection {
    pub landmarks: Vec<[f32; 2]>,
    pub label: String,
    pub confidence: f32,
}

/// Live camera boundary. `next_frame` blocks until a new frame is
/// available, which paces the loop at the capture rate — the pipeline
/// never busy-spins faster than frames arrive.
pub trait FrameSource: Send {
    fn open(&mut self) -> Result<(), GestureError>;
    fn next_frame(&mut self) -> Result<VideoFrame, GestureError>;
    fn close(&mut self);
}

/// Hand-tracking model boundary. `detect` returning `Ok(None)` means no
/// hand with a classified gesture was found in the frame.
pub trait HandTracker: Send {
    fn load(&mut self) -> Result<(), GestureError>;
    fn detect(&mut self, frame: &VideoFrame) -> Result<Option<HandDetection>, GestureError>;
}

/// Whether the host has asked for gesture control of the camera. Samples
/// published over RPC while disabled are dropped at the boundary; on
/// native, flipping this drives the capture pipeline lifecycle.
#[derive(Resource, Default)]
pub struct GestureControl {
    pub enabled: bool,
}

/// Latest published gesture sample, shared with the render schedule.
#[derive(Resource, Clone)]
pub struct GestureInput(pub SampleSlot);

impl Default for GestureInput {
    fn default() -> Self {
        Self(SampleSlot::new())
    }
}

/// Latest tracker status, forwarded to the host by the RPC layer.
#[derive(Resource, Clone)]
pub struct TrackerStatusChannel(pub Slot<TrackerStatus>);

impl Default for TrackerStatusChannel {
    fn default() -> Self {
        Self(Slot::new())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{BackendFactory, GesturePipeline, GestureRuntime, apply_gesture_control};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread::JoinHandle;

    /// Owns the capture/infer thread. Enabling acquires the stream and
    /// model from scratch; disabling stops the loop and clears presence so
    /// the camera halts instantly instead of drifting on a stale sample.
    pub struct GesturePipeline {
        samples: SampleSlot,
        status: Slot<TrackerStatus>,
        running: Arc<AtomicBool>,
        worker: Option<JoinHandle<()>>,
    }

    impl GesturePipeline {
        pub fn new(samples: SampleSlot, status: Slot<TrackerStatus>) -> Self {
            Self {
                samples,
                status,
                running: Arc::new(AtomicBool::new(false)),
                worker: None,
            }
        }

        pub fn enable(
            &mut self,
            source: Box<dyn FrameSource>,
            tracker: Box<dyn HandTracker>,
        ) {
            self.disable();
            self.running.store(true, Ordering::Release);

            let samples = self.samples.clone();
            let status = self.status.clone();
            let running = self.running.clone();
            self.worker = Some(std::thread::spawn(move || {
                run_loop(source, tracker, samples, status, running);
            }));
        }

        pub fn disable(&mut self) {
            self.running.store(false, Ordering::Release);
            if let Some(worker) = self.worker.take() {
                let _ = worker.join();
            }
        }

        pub fn is_enabled(&self) -> bool {
            self.running.load(Ordering::Acquire)
        }
    }

    impl Drop for GesturePipeline {
        fn drop(&mut self) {
            self.disable();
        }
    }

    /// Produces a fresh source/tracker pair for each enable-cycle.
    pub type BackendFactory =
        Box<dyn Fn() -> (Box<dyn FrameSource>, Box<dyn HandTracker>) + Send + Sync>;

    /// Composition-root owner of the capture pipeline. The host toggles
    /// `GestureControl`; this maps the flag onto the pipeline lifecycle.
    #[derive(Resource)]
    pub struct GestureRuntime {
        pipeline: GesturePipeline,
        backend: Option<BackendFactory>,
        status: Slot<TrackerStatus>,
    }

    impl GestureRuntime {
        pub fn new(samples: SampleSlot, status: Slot<TrackerStatus>) -> Self {
            Self {
                pipeline: GesturePipeline::new(samples, status.clone()),
                backend: None,
                status,
            }
        }

        pub fn with_backend(mut self, backend: BackendFactory) -> Self {
            self.backend = Some(backend);
            self
        }

        pub fn set_enabled(&mut self, enabled: bool) {
            if !enabled {
                self.pipeline.disable();
                return;
            }
            match &self.backend {
                Some(factory) => {
                    let (source, tracker) = factory();
                    self.pipeline.enable(source, tracker);
                }
                None => {
                    self.status.publish(TrackerStatus::Error(
                        "no capture backend configured".to_string(),
                    ));
                }
            }
        }
    }

    /// Applies host enable/disable requests to the owned pipeline.
    pub fn apply_gesture_control(
        control: Res<GestureControl>,
        mut runtime: ResMut<GestureRuntime>,
    ) {
        if !control.is_changed() || control.is_added() {
            return;
        }
        runtime.set_enabled(control.enabled);
    }

    fn run_loop(
        mut source: Box<dyn FrameSource>,
        mut tracker: Box<dyn HandTracker>,
        samples: SampleSlot,
        status: Slot<TrackerStatus>,
        running: Arc<AtomicBool>,
    ) {
        status.publish(TrackerStatus::Initializing);

        // Acquisition failures are terminal for this enable-cycle: report
        // and halt, no automatic retry.
        status.publish(TrackerStatus::DownloadingModel);
        if let Err(error) = tracker.load() {
            error!("Hand tracker model load failed: {error}");
            status.publish(TrackerStatus::Error(error.to_string()));
            running.store(false, Ordering::Release);
            return;
        }

        status.publish(TrackerStatus::RequestingCamera);
        if let Err(error) = source.open() {
            error!("Camera acquisition failed: {error}");
            status.publish(TrackerStatus::Error(error.to_string()));
            running.store(false, Ordering::Release);
            return;
        }

        status.publish(TrackerStatus::Ready);
        let mut last_timestamp = 0.0;

        while running.load(Ordering::Acquire) {
            let frame = match source.next_frame() {
                Ok(frame) => frame,
                Err(GestureError::StreamEnded) => break,
                Err(error) => {
                    error!("Capture stream failed: {error}");
                    status.publish(TrackerStatus::Error(error.to_string()));
                    break;
                }
            };
            last_timestamp = frame.timestamp;

            match tracker.detect(&frame) {
                Ok(Some(detection)) => {
                    status.publish(TrackerStatus::Detected(detection.label.clone()));
                    samples.publish(GestureSample {
                        timestamp: frame.timestamp,
                        landmarks: Some(detection.landmarks),
                        label: Some(detection.label),
                        confidence: detection.confidence.clamp(0.0, 1.0),
                        hand_present: true,
                    });
                }
                Ok(None) => {
                    // Presence loss is published immediately so the camera
                    // rotation stops on this very sample, not after a decay.
                    status.publish(TrackerStatus::NoHand);
                    samples.publish(GestureSample::absent(frame.timestamp));
                }
                Err(error) => {
                    // A single bad inference skips the frame; the loop
                    // continues on the next one.
                    warn!("Inference failed, skipping frame: {error}");
                }
            }
        }

        source.close();
        samples.publish(GestureSample::absent(last_timestamp));
        status.publish(TrackerStatus::CameraOff);
        running.store(false, Ordering::Release);
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        struct ScriptedSource {
            frames: usize,
            served: usize,
            fail_open: bool,
        }

        impl FrameSource for ScriptedSource {
            fn open(&mut self) -> Result<(), GestureError> {
                if self.fail_open {
                    Err(GestureError::PermissionDenied)
                } else {
                    Ok(())
                }
            }

            fn next_frame(&mut self) -> Result<VideoFrame, GestureError> {
                if self.served >= self.frames {
                    return Err(GestureError::StreamEnded);
                }
                self.served += 1;
                Ok(VideoFrame {
                    data: Vec::new(),
                    width: 2,
                    height: 2,
                    timestamp: self.served as f64,
                })
            }

            fn close(&mut self) {}
        }

        /// Alternates hand / no-hand / inference failure over the frames.
        struct ScriptedTracker {
            calls: usize,
        }

        impl HandTracker for ScriptedTracker {
            fn load(&mut self) -> Result<(), GestureError> {
                Ok(())
            }

            fn detect(
                &mut self,
                _frame: &VideoFrame,
            ) -> Result<Option<HandDetection>, GestureError> {
                self.calls += 1;
                match self.calls % 3 {
                    1 => Ok(Some(HandDetection {
                        landmarks: vec![[0.5, 0.5]; 21],
                        label: "Open_Palm".into(),
                        confidence: 0.9,
                    })),
                    2 => Ok(None),
                    _ => Err(GestureError::Inference("transient".into())),
                }
            }
        }

        #[test]
        fn pipeline_publishes_samples_and_ends_with_camera_off() {
            let samples = SampleSlot::new();
            let status = Slot::new();
            let mut pipeline = GesturePipeline::new(samples.clone(), status.clone());
            pipeline.enable(
                Box::new(ScriptedSource {
                    frames: 9,
                    served: 0,
                    fail_open: false,
                }),
                Box::new(ScriptedTracker { calls: 0 }),
            );
            pipeline.disable();

            // Stream exhausted: final published sample is the absent one.
            let last = samples.latest().expect("a sample was published");
            assert!(!last.hand_present);
            assert_eq!(status.latest(), Some(TrackerStatus::CameraOff));
        }

        #[test]
        fn acquisition_failure_is_terminal_with_error_status() {
            let samples = SampleSlot::new();
            let status = Slot::new();
            let mut pipeline = GesturePipeline::new(samples.clone(), status.clone());
            pipeline.enable(
                Box::new(ScriptedSource {
                    frames: 9,
                    served: 0,
                    fail_open: true,
                }),
                Box::new(ScriptedTracker { calls: 0 }),
            );
            pipeline.disable();

            assert!(!pipeline.is_enabled());
            match status.latest() {
                Some(TrackerStatus::Error(reason)) => {
                    assert!(reason.contains("permission"));
                }
                other => panic!("expected error status, got {other:?}"),
            }
            // No sample was ever produced.
            assert!(samples.latest().is_none());
        }

        #[test]
        fn inference_failures_skip_frames_without_stopping() {
            let samples = SampleSlot::new();
            let status = Slot::new();
            let mut pipeline = GesturePipeline::new(samples.clone(), status.clone());
            pipeline.enable(
                Box::new(ScriptedSource {
                    frames: 3,
                    served: 0,
                    fail_open: false,
                }),
                Box::new(ScriptedTracker { calls: 0 }),
            );
            pipeline.disable();

            // Frame 3 failed inference but the loop reached stream end and
            // shut down cleanly.
            assert_eq!(status.latest(), Some(TrackerStatus::CameraOff));
        }

        #[test]
        fn runtime_without_backend_reports_an_error_on_enable() {
            let samples = SampleSlot::new();
            let status = Slot::new();
            let mut runtime = GestureRuntime::new(samples.clone(), status.clone());
            runtime.set_enabled(true);

            match status.latest() {
                Some(TrackerStatus::Error(reason)) => assert!(reason.contains("backend")),
                other => panic!("expected error status, got {other:?}"),
            }
            assert!(samples.latest().is_none());
        }

        #[test]
        fn runtime_backend_lifecycle_enables_and_disables() {
            let samples = SampleSlot::new();
            let status = Slot::new();
            let mut runtime = GestureRuntime::new(samples.clone(), status.clone())
                .with_backend(Box::new(|| {
                    (
                        Box::new(ScriptedSource {
                            frames: 6,
                            served: 0,
                            fail_open: false,
                        }),
                        Box::new(ScriptedTracker { calls: 0 }),
                    )
                }));

            runtime.set_enabled(true);
            runtime.set_enabled(false);
            assert_eq!(status.latest(), Some(TrackerStatus::CameraOff));
            // The final published sample reports the hand gone.
            assert!(!samples.latest().expect("loop ran").hand_present);
        }
    }
}
