//! ECS systems that operate on the room world each frame.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! Per-room state they need is passed in by the engine.

pub mod capture;
pub mod guard_ai;
pub mod snapshot;
