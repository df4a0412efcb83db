//! Kind-specific behavioral profiles.
//!
//! Consolidates the per-kind choices the guard and its state machine read.

use heist_core::constants::*;
use heist_core::enums::{GuardKind, GuardStateName, SpriteSheet};

/// Behavioral profile for a guard kind.
pub struct GuardBehaviorProfile {
    /// State the guard starts in.
    pub initial_state: GuardStateName,
    /// Whether the vision cone tweens between headings.
    pub smooth_rotation: bool,
    /// Sprite sheet while in the initial state.
    pub sheet: SpriteSheet,
    /// Seconds per animation frame on that sheet.
    pub frame_interval: f32,
}

/// Get the behavioral profile for a given kind.
pub fn get_profile(kind: GuardKind) -> GuardBehaviorProfile {
    match kind {
        GuardKind::Stationary => GuardBehaviorProfile {
            initial_state: GuardStateName::Idle,
            smooth_rotation: true,
            sheet: SpriteSheet::GuardIdle,
            frame_interval: IDLE_FRAME_INTERVAL,
        },
        GuardKind::Patrol => GuardBehaviorProfile {
            initial_state: GuardStateName::Patrol,
            // Patrol cones snap; a tween would lag behind the walk
            smooth_rotation: false,
            sheet: SpriteSheet::GuardWalk,
            frame_interval: WALK_FRAME_INTERVAL,
        },
    }
}
