//! Capture system: debounces the guards' capture notifications.
//!
//! Any number of guards may finish their alert delay in the same frame or
//! in later frames; the room reports one capture per episode.

use tracing::{debug, info};

use heist_core::components::GuardId;
use heist_core::events::RoomEvent;

/// Callback invoked once per capture episode.
pub type CaptureCallback = Box<dyn FnMut()>;

/// Whether the current episode has already ended in a capture.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureLatch {
    caught_by: Option<GuardId>,
}

impl CaptureLatch {
    pub fn is_caught(&self) -> bool {
        self.caught_by.is_some()
    }

    /// Guard whose notification ended the episode.
    pub fn caught_by(&self) -> Option<GuardId> {
        self.caught_by
    }

    pub fn reset(&mut self) {
        self.caught_by = None;
    }
}

/// Run the capture system for this frame's notifications.
pub fn run(
    caught: &[GuardId],
    latch: &mut CaptureLatch,
    events: &mut Vec<RoomEvent>,
    callback: &mut Option<CaptureCallback>,
) {
    for &guard_id in caught {
        if latch.is_caught() {
            debug!(guard = guard_id.0, "Capture already reported this episode");
            continue;
        }

        latch.caught_by = Some(guard_id);
        info!(guard = guard_id.0, "Player caught");
        events.push(RoomEvent::PlayerCaught { guard_id });
        if let Some(callback) = callback.as_mut() {
            callback();
        }
    }
}
