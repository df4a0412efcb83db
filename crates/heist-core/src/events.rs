//! Events emitted by the room simulation for audio and UI feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::GuardId;
use crate::enums::GuardStateName;

/// Something the game layer may want to react to this frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RoomEvent {
    /// A guard switched behavior state.
    GuardStateChanged {
        guard_id: GuardId,
        from: GuardStateName,
        to: GuardStateName,
    },
    /// A guard spotted the player.
    GuardAlerted {
        guard_id: GuardId,
        /// Guard grid position at the moment of detection.
        position: Vec2,
    },
    /// The capture delay elapsed; the play session should end.
    PlayerCaught { guard_id: GuardId },
}
