//! Directional sprite clips for guards.
//!
//! Both guard sheets hold six frames per facing, in the row order
//! right, up, left, down.

use heist_core::constants::{IDLE_FRAME_INTERVAL, WALK_FRAME_INTERVAL};
use heist_core::enums::{Direction, SpriteSheet};

pub const FRAMES_PER_DIRECTION: usize = 6;

/// First frame of a facing's row on a guard sheet.
pub fn first_frame(direction: Direction) -> usize {
    let row = match direction {
        Direction::Right => 0,
        Direction::Up => 1,
        Direction::Left => 2,
        Direction::Down => 3,
    };
    row * FRAMES_PER_DIRECTION
}

/// A looping clip: one facing on one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub sheet: SpriteSheet,
    pub direction: Direction,
    interval: f32,
    timer: f32,
    index: usize,
}

impl Animation {
    pub fn new(sheet: SpriteSheet, direction: Direction, interval: f32) -> Self {
        Self {
            sheet,
            direction,
            interval,
            timer: 0.0,
            index: 0,
        }
    }

    pub fn idle(direction: Direction) -> Self {
        Self::new(SpriteSheet::GuardIdle, direction, IDLE_FRAME_INTERVAL)
    }

    pub fn walk(direction: Direction) -> Self {
        Self::new(SpriteSheet::GuardWalk, direction, WALK_FRAME_INTERVAL)
    }

    /// Same sheet and facing, so switching would only restart the loop.
    pub fn same_clip(&self, other: &Animation) -> bool {
        self.sheet == other.sheet && self.direction == other.direction
    }

    pub fn update(&mut self, dt: f32) {
        if self.interval <= 0.0 || dt <= 0.0 {
            return;
        }
        self.timer += dt;
        while self.timer >= self.interval {
            self.timer -= self.interval;
            self.index = (self.index + 1) % FRAMES_PER_DIRECTION;
        }
    }

    /// Absolute frame index on the sheet.
    pub fn frame(&self) -> usize {
        first_frame(self.direction) + self.index
    }
}
