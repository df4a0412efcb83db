//! Errors surfaced while setting up a room.

use thiserror::Error;

use heist_guard_ai::SpawnError;
use heist_tiles::TiledError;

#[derive(Debug, Error)]
pub enum SimError {
    /// The room map could not be read
    #[error("Room map error: {0}")]
    Map(#[from] TiledError),

    /// A guard object could not be turned into a guard
    #[error("Guard spawn error: {0}")]
    Spawn(#[from] SpawnError),

    /// Bad simulation config JSON
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
