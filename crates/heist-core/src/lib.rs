//! Core types and definitions for the museum heist guard simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! grid/pixel types, directions, constants, ECS marker components,
//! events and the renderer snapshot.
//! It has no dependency on any runtime framework.

pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
