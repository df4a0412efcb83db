//! Guard tuning knobs, loadable from JSON.

use serde::{Deserialize, Serialize};

use heist_core::constants::*;

/// Timing and behavior parameters shared by every guard in a room.
/// Missing fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardTuning {
    /// Seconds a stationary guard holds a facing before turning.
    pub idle_dwell_secs: f32,
    /// Seconds one turn takes.
    pub rotation_duration_secs: f32,
    /// Seconds between the alert and the capture.
    pub alert_capture_delay_secs: f32,
    /// Distance (tiles) at which a waypoint counts as reached.
    pub waypoint_epsilon_tiles: f32,
    /// Chance a stationary guard turns toward its primary direction.
    pub primary_direction_chance: f64,
    /// Patrol speed (pixels per second) unless a guard overrides it.
    pub patrol_speed: f32,
    /// Stationary turn speed (degrees per second) unless a guard overrides it.
    pub rotation_speed: f32,
}

impl Default for GuardTuning {
    fn default() -> Self {
        Self {
            idle_dwell_secs: IDLE_DWELL_SECS,
            rotation_duration_secs: ROTATION_DURATION_SECS,
            alert_capture_delay_secs: ALERT_CAPTURE_DELAY_SECS,
            waypoint_epsilon_tiles: WAYPOINT_EPSILON_TILES,
            primary_direction_chance: PRIMARY_DIRECTION_CHANCE,
            patrol_speed: DEFAULT_PATROL_SPEED,
            rotation_speed: DEFAULT_GUARD_ROTATION_SPEED,
        }
    }
}

impl GuardTuning {
    /// Waypoint arrival distance. Zero, negative or non-finite settings
    /// fall back to the default so a patrol always has a positive radius.
    pub fn waypoint_epsilon(&self) -> f32 {
        if self.waypoint_epsilon_tiles.is_finite() && self.waypoint_epsilon_tiles > 0.0 {
            self.waypoint_epsilon_tiles
        } else {
            WAYPOINT_EPSILON_TILES
        }
    }
}
