//! Room simulation for the museum heist.
//!
//! Owns the hecs ECS world of guards and the player, runs the guard
//! systems once per frame and produces RoomSnapshots for the renderer.

pub mod engine;
pub mod error;
pub mod systems;
pub mod world_setup;

pub use heist_core as core;
pub use engine::{RoomSimulation, SimConfig};
pub use error::SimError;
