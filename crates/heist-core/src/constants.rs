//! Simulation constants and tuning defaults.

use glam::Vec2;

/// Nominal frame rate used by headless drivers (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per frame at the nominal frame rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Tiles ---

/// Edge length of one map tile in pixels.
pub const TILE_SIZE: f32 = 32.0;

/// Line-of-sight sample spacing (pixels). Half a tile.
pub const LOS_SAMPLE_STEP: f32 = TILE_SIZE / 2.0;

// --- Vision cone ---

/// Base range is scaled by this so the drawn cone never sits exactly on the range boundary.
pub const VISION_RANGE_MARGIN: f32 = 0.95;

/// Number of arc segments in the cone polygon (arc points = segments + 1).
pub const VISION_ARC_SEGMENTS: usize = 20;

/// Smooth rotation speed of a vision cone (degrees per second).
pub const VISION_ROTATION_SPEED_DEG: f32 = 180.0;

/// Heading differences below this (degrees) snap to the target.
pub const VISION_SNAP_EPSILON_DEG: f32 = 0.1;

/// Detection multiplier while the player stands.
pub const STANDING_DETECTION_MULTIPLIER: f32 = 1.0;

/// Detection multiplier while the player crouches.
pub const CROUCH_DETECTION_MULTIPLIER: f32 = 0.6;

// --- Guards ---

/// Default detection range (tiles).
pub const DEFAULT_DETECTION_RANGE_TILES: f32 = 5.0;

/// Default detection angle (degrees, full sector width).
pub const DEFAULT_DETECTION_ANGLE_DEG: f32 = 60.0;

/// Time a stationary guard holds still before rotating (seconds).
pub const IDLE_DWELL_SECS: f32 = 7.0;

/// Duration of one stationary-guard rotation (seconds).
pub const ROTATION_DURATION_SECS: f32 = 0.5;

/// Delay between a guard going alert and the capture notification (seconds).
pub const ALERT_CAPTURE_DELAY_SECS: f32 = 2.0;

/// Probability that a stationary guard turns toward its primary direction.
pub const PRIMARY_DIRECTION_CHANCE: f64 = 0.85;

/// Informational rotation speed of stationary guards (degrees per second).
pub const DEFAULT_GUARD_ROTATION_SPEED: f32 = 45.0;

/// Patrol walking speed (pixels per second).
pub const DEFAULT_PATROL_SPEED: f32 = 30.0;

/// Distance at which a patrol guard counts a waypoint as reached (tiles).
pub const WAYPOINT_EPSILON_TILES: f32 = 0.1;

// --- Animation ---

/// Idle sheet frame interval (seconds).
pub const IDLE_FRAME_INTERVAL: f32 = 0.2;

/// Walk sheet frame interval (seconds).
pub const WALK_FRAME_INTERVAL: f32 = 0.15;

// --- Player ---

/// Offset from the player's sprite canvas position to the point guards look at (pixels).
pub const PLAYER_SIGHT_OFFSET: Vec2 = Vec2::new(16.0, 32.0);
