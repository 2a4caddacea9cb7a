use std::sync::{Arc, Mutex};

use super::sample::GestureSample;

/// Single-slot most-recent-wins mailbox. The producer atomically replaces
/// the snapshot; readers clone the latest value without ever blocking the
/// producer for longer than the swap. There is no queue: intermediate
/// values are dropped by design.
#[derive(Debug, Default, Clone)]
pub struct Slot<T>(Arc<Mutex<Option<T>>>);

impl<T: Clone> Slot<T> {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(None)))
    }

    pub fn publish(&self, value: T) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(value);
        }
    }

    pub fn latest(&self) -> Option<T> {
        self.0.lock().ok().and_then(|slot| slot.clone())
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = None;
        }
    }
}

pub type SampleSlot = Slot<GestureSample>;
