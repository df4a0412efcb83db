//! Guard AI system: advances every guard one frame.
//!
//! Calls `Guard::update` from heist-guard-ai with this frame's player and
//! collision surface, then turns the guards' signals into room events.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use heist_core::components::GuardId;
use heist_core::events::RoomEvent;
use heist_guard_ai::{Guard, GuardSignal, Surroundings};
use heist_tiles::TileQuery;

use crate::world_setup::find_player;

/// Run the guard AI system. Returns the guards whose capture delay elapsed
/// this frame, in update order.
pub fn run(
    world: &mut World,
    dt: f32,
    tiles: Option<&dyn TileQuery>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<RoomEvent>,
) -> Vec<GuardId> {
    // Player is resolved before any guard moves
    let player = find_player(world);
    let surroundings = Surroundings::new(player.as_ref(), tiles);
    let mut caught = Vec::new();

    for (_entity, (&guard_id, guard)) in world.query_mut::<(&GuardId, &mut Guard)>() {
        for signal in guard.update(dt, &surroundings, rng) {
            match signal {
                GuardSignal::StateChanged { from, to } => {
                    events.push(RoomEvent::GuardStateChanged { guard_id, from, to });
                }
                GuardSignal::Alerted { position } => {
                    info!(guard = guard_id.0, "Player spotted");
                    events.push(RoomEvent::GuardAlerted { guard_id, position });
                }
                GuardSignal::PlayerCaught => caught.push(guard_id),
            }
        }
    }

    caught
}
