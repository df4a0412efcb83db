//! Guard AI for the museum heist.
//!
//! Implements guard vision cones, the per-guard behavior state machines,
//! kind-specific behavior profiles and guard construction from map objects.

pub mod animation;
pub mod factory;
pub mod fsm;
pub mod guard;
pub mod profiles;
pub mod tuning;
pub mod vision;

pub use heist_core as core;

pub use factory::{guard_from_object, SpawnError};
pub use fsm::GuardSignal;
pub use guard::{Behavior, Guard, GuardSpec, PatrolRoute, StationaryBehavior, Surroundings};
pub use tuning::GuardTuning;
pub use vision::VisionCone;

#[cfg(test)]
mod tests;
