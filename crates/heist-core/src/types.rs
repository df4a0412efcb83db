//! Fundamental geometric and simulation types.
//!
//! Two coordinate spaces are in play: grid space (tiles, fractional) and
//! pixel space. Vision geometry runs in pixels, guard movement in tiles.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::constants::{
    CROUCH_DETECTION_MULTIPLIER, PLAYER_SIGHT_OFFSET, STANDING_DETECTION_MULTIPLIER, TILE_SIZE,
};

/// Pixel coordinates of the center of the tile containing a grid position.
///
/// Fractional grid positions are offset by the same half tile, so a guard at
/// (5.5, 5.0) has its eye at (192, 176).
pub fn grid_to_pixel_center(grid: Vec2) -> Vec2 {
    grid * TILE_SIZE + Vec2::splat(TILE_SIZE / 2.0)
}

/// Grid cell containing a pixel position.
pub fn pixel_to_cell(pixel: Vec2) -> IVec2 {
    (pixel / TILE_SIZE).floor().as_ivec2()
}

/// What guards need to know about the player for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Point guards test against, in pixels.
    pub position: Vec2,
    pub crouching: bool,
}

impl PlayerSnapshot {
    pub fn new(position: Vec2, crouching: bool) -> Self {
        Self {
            position,
            crouching,
        }
    }

    /// Player standing in the middle of grid cell `(x, y)`.
    pub fn at_tile(x: i32, y: i32, crouching: bool) -> Self {
        Self::new(grid_to_pixel_center(Vec2::new(x as f32, y as f32)), crouching)
    }

    /// Player whose sprite is drawn at `canvas` (top-left, pixels).
    pub fn from_canvas(canvas: Vec2, crouching: bool) -> Self {
        Self::new(canvas + PLAYER_SIGHT_OFFSET, crouching)
    }

    /// Multiplier applied to vision range for this player.
    pub fn detection_multiplier(&self) -> f32 {
        if self.crouching {
            CROUCH_DETECTION_MULTIPLIER
        } else {
            STANDING_DETECTION_MULTIPLIER
        }
    }

    /// Grid cell the player's sight point is in.
    pub fn cell(&self) -> IVec2 {
        pixel_to_cell(self.position)
    }
}

/// Simulation time tracking. Frames carry a caller-supplied delta.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Frame number (increments by 1 each tick).
    pub frame: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.frame += 1;
        self.elapsed_secs += f64::from(dt);
    }
}
