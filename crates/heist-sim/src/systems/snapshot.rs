//! Snapshot system: queries the world and builds a RoomSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use heist_core::components::GuardId;
use heist_core::events::RoomEvent;
use heist_core::state::{GuardView, RoomSnapshot};
use heist_core::types::SimTime;
use heist_guard_ai::Guard;

/// Build the snapshot for the frame just simulated.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    player_caught: bool,
    events: Vec<RoomEvent>,
) -> RoomSnapshot {
    RoomSnapshot {
        time: *time,
        guards: build_guards(world),
        player_caught,
        events,
    }
}

/// Guard views ordered by guard id.
fn build_guards(world: &World) -> Vec<GuardView> {
    let mut guards: Vec<GuardView> = world
        .query::<(&GuardId, &Guard)>()
        .iter()
        .map(|(_, (&id, guard))| guard.view(id))
        .collect();
    guards.sort_by_key(|view| view.guard_id.0);
    guards
}
