//! Guard behavior finite state machine.
//!
//! Each state is a small struct holding only its own timers. The owning
//! guard builds a fresh instance on every transition, runs `exit` on the
//! old state and `enter` on the new one, so no timer survives a change.
//! States act on the guard body directly and report what happened through
//! `GuardSignal`s.

use glam::Vec2;
use tracing::info;

use heist_core::constants::TILE_SIZE;
use heist_core::enums::{Direction, GuardStateName};

use crate::animation::Animation;
use crate::guard::{Behavior, GuardBody};

/// Something a guard reports to its owner during an update.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardSignal {
    StateChanged {
        from: GuardStateName,
        to: GuardStateName,
    },
    /// The guard's grid position when it spotted the player.
    Alerted { position: Vec2 },
    /// The alert delay elapsed.
    PlayerCaught,
}

/// Result of one state update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    To(GuardStateName),
}

/// Stationary guard holding its facing.
#[derive(Debug, Clone, Default)]
pub struct IdleState {
    elapsed: f32,
}

/// Stationary guard turning to a new facing.
#[derive(Debug, Clone)]
pub struct RotatingState {
    elapsed: f32,
    target: Direction,
}

/// Patrol guard walking toward its current waypoint.
#[derive(Debug, Clone)]
pub struct PatrolState {
    target: Option<Vec2>,
    facing: Direction,
}

/// Guard that has spotted the player. Terminal.
#[derive(Debug, Clone, Default)]
pub struct AlertState {
    elapsed: f32,
    notified: bool,
}

/// The active state of one guard.
#[derive(Debug, Clone)]
pub enum GuardState {
    Idle(IdleState),
    Rotating(RotatingState),
    Patrol(PatrolState),
    Alert(AlertState),
}

impl GuardState {
    /// A fresh instance of `name`. `turn_target` is only read for Rotating.
    pub(crate) fn fresh(name: GuardStateName, body: &GuardBody, turn_target: Direction) -> Self {
        match name {
            GuardStateName::Idle => GuardState::Idle(IdleState::default()),
            GuardStateName::Rotating => GuardState::Rotating(RotatingState {
                elapsed: 0.0,
                target: turn_target,
            }),
            GuardStateName::Patrol => GuardState::Patrol(PatrolState {
                target: None,
                facing: body.direction,
            }),
            GuardStateName::Alert => GuardState::Alert(AlertState::default()),
        }
    }

    pub fn name(&self) -> GuardStateName {
        match self {
            GuardState::Idle(_) => GuardStateName::Idle,
            GuardState::Rotating(_) => GuardStateName::Rotating,
            GuardState::Patrol(_) => GuardStateName::Patrol,
            GuardState::Alert(_) => GuardStateName::Alert,
        }
    }

    pub(crate) fn enter(&mut self, body: &mut GuardBody, signals: &mut Vec<GuardSignal>) {
        match self {
            GuardState::Idle(_) => {
                let direction = body.direction;
                body.face(direction);
            }
            GuardState::Rotating(s) => {
                body.vision.set_target_rotation(s.target);
            }
            GuardState::Patrol(s) => {
                if let Behavior::Patrol(route) = &body.behavior {
                    s.target = route.current_waypoint();
                }
                body.play(Animation::walk(body.direction));
            }
            GuardState::Alert(_) => {
                info!(x = body.position.x, y = body.position.y, "Guard alerted");
                let direction = body.direction;
                body.face(direction);
                signals.push(GuardSignal::Alerted {
                    position: body.position,
                });
            }
        }
    }

    pub(crate) fn update(
        &mut self,
        body: &mut GuardBody,
        dt: f32,
        signals: &mut Vec<GuardSignal>,
    ) -> Transition {
        match self {
            GuardState::Idle(s) => s.update(body, dt),
            GuardState::Rotating(s) => s.update(body, dt),
            GuardState::Patrol(s) => s.update(body, dt),
            GuardState::Alert(s) => s.update(body, dt, signals),
        }
    }

    pub(crate) fn exit(&mut self, body: &mut GuardBody) {
        if let GuardState::Rotating(s) = self {
            // An interrupted turn still lands on its target facing
            body.face(s.target);
        }
    }
}

impl IdleState {
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn update(&mut self, body: &mut GuardBody, dt: f32) -> Transition {
        self.elapsed += dt;
        if self.elapsed >= body.tuning.idle_dwell_secs {
            Transition::To(GuardStateName::Rotating)
        } else {
            Transition::Stay
        }
    }
}

impl RotatingState {
    pub fn target(&self) -> Direction {
        self.target
    }

    fn update(&mut self, body: &mut GuardBody, dt: f32) -> Transition {
        self.elapsed += dt;
        let duration = body.tuning.rotation_duration_secs;
        let progress = (self.elapsed / duration).min(1.0);

        // Sprite flips halfway through the turn
        if progress >= 0.5 && body.direction != self.target {
            body.face(self.target);
        }

        if self.elapsed >= duration {
            Transition::To(GuardStateName::Idle)
        } else {
            Transition::Stay
        }
    }
}

impl PatrolState {
    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    fn update(&mut self, body: &mut GuardBody, dt: f32) -> Transition {
        let Behavior::Patrol(route) = &mut body.behavior else {
            return Transition::Stay;
        };
        let Some(target) = self.target else {
            return Transition::Stay;
        };

        let delta = target - body.position;
        let distance = delta.length();
        // Zero distance would turn the direction below into 0/0
        if distance == 0.0 || distance.is_nan() || distance < body.tuning.waypoint_epsilon() {
            self.target = route.advance();
            return Transition::Stay;
        }

        let step = (route.move_speed() * dt / TILE_SIZE).min(distance);
        body.position += delta / distance * step;

        let facing = Direction::from_displacement(delta.x, delta.y);
        body.direction = facing;
        if facing != self.facing {
            self.facing = facing;
            body.vision.set_target_rotation(facing);
        }
        body.play(Animation::walk(facing));

        Transition::Stay
    }
}

impl AlertState {
    pub fn has_notified(&self) -> bool {
        self.notified
    }

    fn update(&mut self, body: &mut GuardBody, dt: f32, signals: &mut Vec<GuardSignal>) -> Transition {
        if !self.notified {
            self.elapsed += dt;
            if self.elapsed >= body.tuning.alert_capture_delay_secs {
                self.notified = true;
                signals.push(GuardSignal::PlayerCaught);
            }
        }
        Transition::Stay
    }
}
