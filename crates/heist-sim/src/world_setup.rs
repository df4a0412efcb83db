//! Entity spawn helpers for the room world.
//!
//! Guards are `(GuardId, Guard)` entities; the player is a single
//! `(Player, PlayerSnapshot)` entity, absent while no player is in the room.

use hecs::World;
use tracing::warn;

use heist_core::components::{GuardId, Player};
use heist_core::types::PlayerSnapshot;
use heist_guard_ai::{guard_from_object, Guard, GuardTuning};
use heist_tiles::TiledObject;

/// Spawn one guard entity.
pub fn spawn_guard(world: &mut World, id: GuardId, guard: Guard) -> hecs::Entity {
    world.spawn((id, guard))
}

/// Spawn guards for every usable object of a room's guard layer.
///
/// Objects that cannot become guards are logged and skipped. Returns the
/// spawned guards as they were at spawn time.
pub fn spawn_room_guards(
    world: &mut World,
    objects: &[TiledObject],
    tuning: &GuardTuning,
    next_guard_id: &mut u32,
) -> Vec<(GuardId, Guard)> {
    let mut spawned = Vec::with_capacity(objects.len());
    for object in objects {
        match guard_from_object(object, tuning) {
            Ok(guard) => {
                let id = GuardId(*next_guard_id);
                *next_guard_id += 1;
                spawned.push((id, guard.clone()));
                spawn_guard(world, id, guard);
            }
            Err(err) => {
                warn!(object = object.id, "Skipping guard object: {err}");
            }
        }
    }
    spawned
}

/// Remove every guard entity.
pub fn despawn_guards(world: &mut World) {
    let guards: Vec<hecs::Entity> = world
        .query::<&GuardId>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    for entity in guards {
        let _ = world.despawn(entity);
    }
}

/// Replace the player entity. `None` removes the player.
pub fn set_player(world: &mut World, player: Option<PlayerSnapshot>) {
    let existing: Vec<hecs::Entity> = world
        .query::<&Player>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    for entity in existing {
        let _ = world.despawn(entity);
    }
    if let Some(snapshot) = player {
        world.spawn((Player, snapshot));
    }
}

/// The player as guards see it this frame.
pub fn find_player(world: &World) -> Option<PlayerSnapshot> {
    world
        .query::<(&Player, &PlayerSnapshot)>()
        .iter()
        .next()
        .map(|(_, (_, snapshot))| *snapshot)
}
