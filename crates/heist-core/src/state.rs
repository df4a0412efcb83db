//! Room snapshot: the visible guard state handed to the renderer each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::GuardId;
use crate::enums::*;
use crate::events::RoomEvent;
use crate::types::SimTime;

/// Complete room state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub time: SimTime,
    pub guards: Vec<GuardView>,
    /// True once the capture notification has fired this episode.
    pub player_caught: bool,
    pub events: Vec<RoomEvent>,
}

/// One guard as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardView {
    pub guard_id: GuardId,
    pub kind: GuardKind,
    pub state: GuardStateName,
    /// Grid position (fractional tiles).
    pub position: Vec2,
    pub direction: Direction,
    pub sheet: SpriteSheet,
    /// Frame index into `sheet`.
    pub frame: usize,
    pub cone: VisionConeView,
}

/// Vision cone polygon for drawing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisionConeView {
    /// Center followed by the arc points, in pixels.
    pub vertices: Vec<Vec2>,
    /// Current heading (degrees).
    pub heading: f32,
    /// Current effective range (pixels).
    pub range: f32,
}
