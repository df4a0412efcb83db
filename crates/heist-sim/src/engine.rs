//! Room simulation engine.
//!
//! `RoomSimulation` owns the hecs world of one museum room, runs the guard
//! systems each frame and produces `RoomSnapshot`s. Completely headless;
//! the game layer supplies the player snapshot and frame delta.

use std::path::Path;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use heist_core::components::GuardId;
use heist_core::enums::GuardStateName;
use heist_core::events::RoomEvent;
use heist_core::state::RoomSnapshot;
use heist_core::types::{PlayerSnapshot, SimTime};
use heist_guard_ai::{guard_from_object, Guard, GuardTuning};
use heist_tiles::tiled::GUARDS_LAYER;
use heist_tiles::{CollisionGrid, TileQuery, TiledMap, TiledObject};

use crate::error::SimError;
use crate::systems;
use crate::systems::capture::{CaptureCallback, CaptureLatch};
use crate::world_setup;

/// Configuration for a room simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same guard turns.
    pub seed: u64,
    pub tuning: GuardTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: GuardTuning::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// The simulation of one room. Owns the ECS world and all room state.
pub struct RoomSimulation {
    world: World,
    collision: Option<CollisionGrid>,
    time: SimTime,
    rng: ChaCha8Rng,
    seed: u64,
    tuning: GuardTuning,
    next_guard_id: u32,
    /// Guards as spawned, for restarts.
    roster: Vec<(GuardId, Guard)>,
    capture: CaptureLatch,
    events: Vec<RoomEvent>,
    on_capture: Option<CaptureCallback>,
}

impl RoomSimulation {
    /// Create an empty room with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            collision: None,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seed: config.seed,
            tuning: config.tuning,
            next_guard_id: 0,
            roster: Vec::new(),
            capture: CaptureLatch::default(),
            events: Vec::new(),
            on_capture: None,
        }
    }

    /// Create a room from a map JSON document.
    pub fn from_map_json(json: &str, config: SimConfig) -> Result<Self, SimError> {
        let map = TiledMap::from_json_str(json)?;
        let mut sim = Self::new(config);
        sim.load_room(&map)?;
        Ok(sim)
    }

    /// Replace the room's collision and guards with those of `map`.
    /// Returns the number of guards spawned.
    pub fn load_room(&mut self, map: &TiledMap) -> Result<usize, SimError> {
        let collision = map.collision_grid()?;
        info!(
            width = map.width,
            height = map.height,
            solid = collision.solid_count(),
            "Room loaded"
        );
        self.collision = Some(collision);

        world_setup::despawn_guards(&mut self.world);
        self.roster = world_setup::spawn_room_guards(
            &mut self.world,
            map.objects(GUARDS_LAYER),
            &self.tuning,
            &mut self.next_guard_id,
        );
        info!(guards = self.roster.len(), "Guards spawned");
        Ok(self.roster.len())
    }

    /// Set or clear the collision surface guards look through.
    pub fn set_collision(&mut self, collision: Option<CollisionGrid>) {
        self.collision = collision;
    }

    /// Add a guard to the room.
    pub fn spawn_guard(&mut self, guard: Guard) -> GuardId {
        let id = GuardId(self.next_guard_id);
        self.next_guard_id += 1;
        self.roster.push((id, guard.clone()));
        world_setup::spawn_guard(&mut self.world, id, guard);
        id
    }

    /// Add a guard built from a map object, using the room's tuning.
    pub fn spawn_guard_object(&mut self, object: &TiledObject) -> Result<GuardId, SimError> {
        let guard = guard_from_object(object, &self.tuning)?;
        Ok(self.spawn_guard(guard))
    }

    /// Player as resolved for the coming frame. `None` disables detection.
    pub fn set_player(&mut self, player: Option<PlayerSnapshot>) {
        world_setup::set_player(&mut self.world, player);
    }

    /// Register the capture notification. Replaces any previous one.
    pub fn set_capture_callback(&mut self, callback: impl FnMut() + 'static) {
        self.on_capture = Some(Box::new(callback));
    }

    /// Advance the room by `dt` seconds and return the resulting snapshot.
    /// Negative or non-finite deltas count as zero.
    pub fn tick(&mut self, dt: f32) -> RoomSnapshot {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let tiles = self.collision.as_ref().map(|grid| grid as &dyn TileQuery);
        let caught = systems::guard_ai::run(&mut self.world, dt, tiles, &mut self.rng, &mut self.events);
        systems::capture::run(&caught, &mut self.capture, &mut self.events, &mut self.on_capture);

        self.time.advance(dt);

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.capture.is_caught(), events)
    }

    /// Start a new capture episode without touching the guards.
    pub fn reset_capture(&mut self) {
        debug!("Capture latch reset");
        self.capture.reset();
    }

    /// Restore every guard to its spawn state and start a new episode.
    /// The RNG is reseeded so a restarted room replays identically.
    pub fn restart(&mut self) {
        world_setup::despawn_guards(&mut self.world);
        for (id, guard) in &self.roster {
            world_setup::spawn_guard(&mut self.world, *id, guard.clone());
        }
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.time = SimTime::default();
        self.events.clear();
        self.capture.reset();
        info!(guards = self.roster.len(), "Room restarted");
    }

    /// Whether the current episode has ended in a capture.
    pub fn is_player_caught(&self) -> bool {
        self.capture.is_caught()
    }

    pub fn guard_count(&self) -> usize {
        self.world.query::<&GuardId>().iter().count()
    }

    /// State of one guard, if it exists.
    pub fn guard_state(&self, id: GuardId) -> Option<GuardStateName> {
        self.world
            .query::<(&GuardId, &Guard)>()
            .iter()
            .find(|(_, (guard_id, _))| **guard_id == id)
            .map(|(_, (_, guard))| guard.state_name())
    }

    pub fn collision(&self) -> Option<&CollisionGrid> {
        self.collision.as_ref()
    }

    pub fn tuning(&self) -> &GuardTuning {
        &self.tuning
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }
}
