//! Tile system for the museum rooms.
//!
//! Tile layers, the combined collision grid guards look through,
//! half-tile line-of-sight sampling and the room map model.

pub use heist_core as core;

pub mod grid;
pub mod layer;
pub mod los;
pub mod query;
pub mod tiled;

// Re-export key types for convenience.
pub use grid::CollisionGrid;
pub use layer::TileLayer;
pub use los::has_line_of_sight;
pub use query::{Tile, TileQuery};
pub use tiled::{TiledError, TiledMap, TiledObject};
