//! The guard actor: body, behavior parameters and state machine.
//!
//! One frame of a guard runs in a fixed order: state update, animation,
//! detection multiplier, vision cone, detection check. Detection therefore
//! tests the post-movement position with the freshly built cone.

use glam::Vec2;
use rand::Rng;
use tracing::debug;

use heist_core::components::GuardId;
use heist_core::constants::*;
use heist_core::enums::{Direction, GuardKind, GuardStateName, SpriteSheet};
use heist_core::state::GuardView;
use heist_core::types::PlayerSnapshot;
use heist_tiles::TileQuery;

use crate::animation::Animation;
use crate::fsm::{GuardSignal, GuardState, Transition};
use crate::profiles::get_profile;
use crate::tuning::GuardTuning;
use crate::vision::VisionCone;

/// Placement and sight parameters of a new guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardSpec {
    /// Grid position (tiles).
    pub position: Vec2,
    pub direction: Direction,
    /// Tiles.
    pub detection_range: f32,
    /// Full sector width (degrees).
    pub detection_angle: f32,
}

impl GuardSpec {
    pub fn at(x: f32, y: f32, direction: Direction) -> Self {
        Self {
            position: Vec2::new(x, y),
            direction,
            ..Self::default()
        }
    }
}

impl Default for GuardSpec {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            direction: Direction::Down,
            detection_range: DEFAULT_DETECTION_RANGE_TILES,
            detection_angle: DEFAULT_DETECTION_ANGLE_DEG,
        }
    }
}

/// Parameters of a guard that stands still and turns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationaryBehavior {
    /// Direction the guard favors when picking a new facing.
    pub primary_direction: Direction,
    /// Degrees per second. Informational; the cone turns at its own rate.
    pub rotation_speed: f32,
    /// Chance of turning toward the primary direction.
    pub primary_direction_chance: f64,
}

impl StationaryBehavior {
    pub fn new(primary_direction: Direction, tuning: &GuardTuning) -> Self {
        Self {
            primary_direction,
            rotation_speed: tuning.rotation_speed,
            primary_direction_chance: tuning.primary_direction_chance,
        }
    }

    /// Pick the facing for the next turn. Never returns `current`.
    pub fn next_direction<R: Rng + ?Sized>(&self, current: Direction, rng: &mut R) -> Direction {
        let chance = if self.primary_direction_chance.is_nan() {
            0.0
        } else {
            self.primary_direction_chance.clamp(0.0, 1.0)
        };
        if rng.gen_bool(chance) {
            self.direction_toward_primary(current, rng)
        } else {
            random_other_direction(current, rng)
        }
    }

    /// One quarter turn toward the primary direction, the shorter way round.
    /// An opposite primary breaks the tie clockwise. Already facing it picks
    /// a random other direction.
    pub fn direction_toward_primary<R: Rng + ?Sized>(
        &self,
        current: Direction,
        rng: &mut R,
    ) -> Direction {
        match current.quarter_turns_to(self.primary_direction) {
            0 => random_other_direction(current, rng),
            1 | 2 => current.clockwise(),
            _ => current.counter_clockwise(),
        }
    }
}

/// Uniform choice among the three directions other than `current`.
pub fn random_other_direction<R: Rng + ?Sized>(current: Direction, rng: &mut R) -> Direction {
    let others = current.others();
    others[rng.gen_range(0..others.len())]
}

/// A cyclic list of grid waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct PatrolRoute {
    waypoints: Vec<Vec2>,
    current: usize,
    move_speed: f32,
}

impl PatrolRoute {
    /// `move_speed` is in pixels per second; negative or non-finite means 0.
    pub fn new(waypoints: Vec<Vec2>, move_speed: f32) -> Self {
        let move_speed = if move_speed.is_finite() {
            move_speed.max(0.0)
        } else {
            0.0
        };
        Self {
            waypoints,
            current: 0,
            move_speed,
        }
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.waypoints.get(self.current).copied()
    }

    /// Step to the next waypoint, wrapping, and return it.
    pub fn advance(&mut self) -> Option<Vec2> {
        if self.waypoints.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.waypoints.len();
        debug!(index = self.current, "Patrol waypoint reached");
        self.current_waypoint()
    }
}

/// Kind-specific behavior data.
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    Stationary(StationaryBehavior),
    Patrol(PatrolRoute),
}

impl Behavior {
    pub fn kind(&self) -> GuardKind {
        match self {
            Behavior::Stationary(_) => GuardKind::Stationary,
            Behavior::Patrol(_) => GuardKind::Patrol,
        }
    }
}

/// What a guard can see of the room this frame.
#[derive(Clone, Copy, Default)]
pub struct Surroundings<'a> {
    /// No player means no detection check.
    pub player: Option<&'a PlayerSnapshot>,
    /// No collision surface means sight is never blocked.
    pub tiles: Option<&'a dyn TileQuery>,
}

impl<'a> Surroundings<'a> {
    pub fn new(player: Option<&'a PlayerSnapshot>, tiles: Option<&'a dyn TileQuery>) -> Self {
        Self { player, tiles }
    }
}

/// Everything a guard owns apart from its current state.
#[derive(Debug, Clone)]
pub struct GuardBody {
    pub(crate) position: Vec2,
    pub(crate) direction: Direction,
    pub(crate) vision: VisionCone,
    pub(crate) behavior: Behavior,
    pub(crate) animation: Animation,
    pub(crate) tuning: GuardTuning,
}

impl GuardBody {
    /// Set the facing and show the resting clip for it.
    pub(crate) fn face(&mut self, direction: Direction) {
        self.direction = direction;
        self.play(Animation::idle(direction));
    }

    /// Switch clips unless the same one is already running.
    pub(crate) fn play(&mut self, clip: Animation) {
        if !self.animation.same_clip(&clip) {
            self.animation = clip;
        }
    }
}

/// A museum guard.
#[derive(Debug, Clone)]
pub struct Guard {
    body: GuardBody,
    state: GuardState,
}

impl Guard {
    pub fn new(spec: GuardSpec, behavior: Behavior, tuning: GuardTuning) -> Self {
        let profile = get_profile(behavior.kind());
        let vision = VisionCone::new(
            spec.position,
            spec.direction,
            spec.detection_range,
            spec.detection_angle,
            profile.smooth_rotation,
        );
        let mut body = GuardBody {
            position: spec.position,
            direction: spec.direction,
            vision,
            behavior,
            animation: Animation::new(profile.sheet, spec.direction, profile.frame_interval),
            tuning,
        };

        let mut state = GuardState::fresh(profile.initial_state, &body, spec.direction);
        state.enter(&mut body, &mut Vec::new());
        Self { body, state }
    }

    pub fn stationary(spec: GuardSpec, primary_direction: Direction, tuning: GuardTuning) -> Self {
        let behavior = StationaryBehavior::new(primary_direction, &tuning);
        Self::new(spec, Behavior::Stationary(behavior), tuning)
    }

    pub fn patrol(spec: GuardSpec, waypoints: Vec<Vec2>, tuning: GuardTuning) -> Self {
        let route = PatrolRoute::new(waypoints, tuning.patrol_speed);
        Self::new(spec, Behavior::Patrol(route), tuning)
    }

    /// Advance the guard by `dt` seconds.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        surroundings: &Surroundings<'_>,
        rng: &mut R,
    ) -> Vec<GuardSignal> {
        let mut signals = Vec::new();

        if let Transition::To(next) = self.state.update(&mut self.body, dt, &mut signals) {
            self.change_state(next, rng, &mut signals);
        }

        self.body.animation.update(dt);

        if let Some(player) = surroundings.player {
            self.body
                .vision
                .set_detection_multiplier(player.detection_multiplier());
        }
        self.body.vision.update(self.body.position, dt);

        if let Some(player) = surroundings.player {
            if !self.is_alert() && self.check_player_detection(player, surroundings.tiles) {
                self.change_state(GuardStateName::Alert, rng, &mut signals);
            }
        }

        signals
    }

    /// Whether the player is inside the cone right now. Applies the player's
    /// stance to the cone range but does not change state.
    pub fn check_player_detection(
        &mut self,
        player: &PlayerSnapshot,
        tiles: Option<&dyn TileQuery>,
    ) -> bool {
        self.body
            .vision
            .set_detection_multiplier(player.detection_multiplier());
        self.body.vision.contains_point(player.position, tiles)
    }

    /// Force the guard into Alert. No-op if already alert.
    pub fn alert(&mut self) -> Vec<GuardSignal> {
        let mut signals = Vec::new();
        if !self.is_alert() {
            let direction = self.body.direction;
            self.install(GuardStateName::Alert, direction, &mut signals);
        }
        signals
    }

    fn change_state<R: Rng + ?Sized>(
        &mut self,
        next: GuardStateName,
        rng: &mut R,
        signals: &mut Vec<GuardSignal>,
    ) {
        // Only stationary guards rotate
        let turn_target = match (next, &self.body.behavior) {
            (GuardStateName::Rotating, Behavior::Stationary(s)) => {
                s.next_direction(self.body.direction, rng)
            }
            _ => self.body.direction,
        };
        self.install(next, turn_target, signals);
    }

    fn install(
        &mut self,
        next: GuardStateName,
        turn_target: Direction,
        signals: &mut Vec<GuardSignal>,
    ) {
        let from = self.state.name();
        self.state.exit(&mut self.body);

        let mut state = GuardState::fresh(next, &self.body, turn_target);
        debug!(?from, to = ?next, "Guard state change");
        signals.push(GuardSignal::StateChanged { from, to: next });
        state.enter(&mut self.body, signals);
        self.state = state;
    }

    pub fn kind(&self) -> GuardKind {
        self.body.behavior.kind()
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    pub fn state_name(&self) -> GuardStateName {
        self.state.name()
    }

    pub fn is_alert(&self) -> bool {
        matches!(self.state, GuardState::Alert(_))
    }

    /// Grid position (tiles).
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn direction(&self) -> Direction {
        self.body.direction
    }

    pub fn vision(&self) -> &VisionCone {
        &self.body.vision
    }

    pub fn behavior(&self) -> &Behavior {
        &self.body.behavior
    }

    pub fn route(&self) -> Option<&PatrolRoute> {
        match &self.body.behavior {
            Behavior::Patrol(route) => Some(route),
            Behavior::Stationary(_) => None,
        }
    }

    pub fn tuning(&self) -> &GuardTuning {
        &self.body.tuning
    }

    pub fn sprite_sheet(&self) -> SpriteSheet {
        self.body.animation.sheet
    }

    pub fn frame(&self) -> usize {
        self.body.animation.frame()
    }

    pub fn view(&self, guard_id: GuardId) -> GuardView {
        GuardView {
            guard_id,
            kind: self.kind(),
            state: self.state_name(),
            position: self.body.position,
            direction: self.body.direction,
            sheet: self.sprite_sheet(),
            frame: self.frame(),
            cone: self.body.vision.view(),
        }
    }
}
