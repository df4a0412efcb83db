//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Guard behavior lives in heist-guard-ai, not here.

use serde::{Deserialize, Serialize};

/// Stable identifier of a guard within a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuardId(pub u32);

/// Marks the player entity. Paired with a `PlayerSnapshot` component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;
