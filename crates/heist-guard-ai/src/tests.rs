#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use heist_core::enums::{Direction, GuardStateName, SpriteSheet};
    use heist_core::types::{grid_to_pixel_center, PlayerSnapshot};
    use heist_tiles::CollisionGrid;

    use crate::fsm::{GuardSignal, GuardState};
    use crate::guard::{random_other_direction, Guard, GuardSpec, StationaryBehavior, Surroundings};
    use crate::tuning::GuardTuning;

    /// Exactly representable frame step so timer thresholds land on frames.
    const STEP: f32 = 0.25;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn stationary_at(x: f32, y: f32, facing: Direction, primary: Direction) -> Guard {
        Guard::stationary(GuardSpec::at(x, y, facing), primary, GuardTuning::default())
    }

    fn run(
        guard: &mut Guard,
        frames: usize,
        surroundings: &Surroundings<'_>,
        rng: &mut ChaCha8Rng,
    ) -> Vec<GuardSignal> {
        (0..frames)
            .flat_map(|_| guard.update(STEP, surroundings, rng))
            .collect()
    }

    fn entries_into(signals: &[GuardSignal], state: GuardStateName) -> usize {
        signals
            .iter()
            .filter(|s| matches!(s, GuardSignal::StateChanged { to, .. } if *to == state))
            .count()
    }

    // --- Stationary behavior ---

    #[test]
    fn test_idle_dwell_then_single_rotation() {
        let mut guard = stationary_at(5.0, 5.0, Direction::Down, Direction::Down);
        let mut rng = rng();
        let none = Surroundings::default();

        // 27 frames = 6.75 s: still idle
        let signals = run(&mut guard, 27, &none, &mut rng);
        assert!(signals.is_empty());
        assert_eq!(guard.state_name(), GuardStateName::Idle);

        // 7.0 s: turn starts
        let signals = run(&mut guard, 1, &none, &mut rng);
        assert_eq!(entries_into(&signals, GuardStateName::Rotating), 1);
        assert_eq!(guard.state_name(), GuardStateName::Rotating);

        // 0.5 s later the turn is over; no second turn for another 7 s
        let signals = run(&mut guard, 2 + 27, &none, &mut rng);
        assert_eq!(entries_into(&signals, GuardStateName::Idle), 1);
        assert_eq!(entries_into(&signals, GuardStateName::Rotating), 0);
        assert_eq!(guard.state_name(), GuardStateName::Idle);
        assert_ne!(guard.direction(), Direction::Down, "a turn always changes facing");
    }

    #[test]
    fn test_rotation_flips_facing_halfway() {
        let tuning = GuardTuning {
            primary_direction_chance: 1.0,
            ..GuardTuning::default()
        };
        let mut guard = Guard::stationary(GuardSpec::at(5.0, 5.0, Direction::Down), Direction::Right, tuning);
        let mut rng = rng();
        let none = Surroundings::default();

        run(&mut guard, 28, &none, &mut rng);
        let target = match guard.state() {
            GuardState::Rotating(r) => r.target(),
            other => panic!("expected Rotating, got {other:?}"),
        };
        // Down -> Right is one counter-clockwise quarter turn
        assert_eq!(target, Direction::Right);
        assert_eq!(guard.direction(), Direction::Down, "not flipped before halfway");
        assert_eq!(guard.vision().target_heading(), 0.0);

        run(&mut guard, 1, &none, &mut rng);
        assert_eq!(guard.direction(), Direction::Right);
        assert_eq!(guard.sprite_sheet(), SpriteSheet::GuardIdle);
        // Cone turns 90° at 180°/s: done within the turn
        assert_eq!(guard.vision().heading(), 0.0);

        run(&mut guard, 1, &none, &mut rng);
        assert_eq!(guard.state_name(), GuardStateName::Idle);
        assert_eq!(guard.direction(), Direction::Right);
    }

    #[test]
    fn test_primary_bias_statistics() {
        // Facing Right with primary Up: Up is one step counter-clockwise.
        // The random branch also lands on Up a third of the time.
        let behavior = StationaryBehavior {
            primary_direction: Direction::Up,
            rotation_speed: 45.0,
            primary_direction_chance: 0.85,
        };
        let mut rng = rng();
        let trials = 10_000;
        let hits = (0..trials)
            .filter(|_| behavior.next_direction(Direction::Right, &mut rng) == Direction::Up)
            .count();
        let fraction = hits as f64 / trials as f64;
        let expected = 0.85 + 0.15 / 3.0;
        assert!(
            (fraction - expected).abs() < 0.02,
            "primary-ward fraction {fraction}, expected about {expected}"
        );
    }

    #[test]
    fn test_opposite_primary_turns_clockwise() {
        let behavior = StationaryBehavior {
            primary_direction: Direction::Up,
            rotation_speed: 45.0,
            primary_direction_chance: 1.0,
        };
        let mut rng = rng();
        for _ in 0..100 {
            assert_eq!(behavior.next_direction(Direction::Down, &mut rng), Direction::Left);
            assert_eq!(behavior.next_direction(Direction::Left, &mut rng), Direction::Up);
            assert_eq!(behavior.next_direction(Direction::Right, &mut rng), Direction::Up);
        }
    }

    #[test]
    fn test_no_bias_is_uniform() {
        let behavior = StationaryBehavior {
            primary_direction: Direction::Up,
            rotation_speed: 45.0,
            primary_direction_chance: 0.0,
        };
        let mut rng = rng();
        let mut counts = [0usize; 4];
        let trials = 9_000;
        for _ in 0..trials {
            let next = behavior.next_direction(Direction::Down, &mut rng);
            assert_ne!(next, Direction::Down);
            let i = Direction::CLOCKWISE.iter().position(|d| *d == next).unwrap();
            counts[i] += 1;
        }
        for (d, count) in Direction::CLOCKWISE.iter().zip(counts) {
            if *d == Direction::Down {
                continue;
            }
            let fraction = count as f64 / trials as f64;
            assert!((fraction - 1.0 / 3.0).abs() < 0.03, "{d:?}: {fraction}");
        }
    }

    #[test]
    fn test_already_facing_primary_picks_other() {
        let behavior = StationaryBehavior {
            primary_direction: Direction::Left,
            rotation_speed: 45.0,
            primary_direction_chance: 1.0,
        };
        let mut rng = rng();
        for _ in 0..200 {
            assert_ne!(behavior.next_direction(Direction::Left, &mut rng), Direction::Left);
            assert_ne!(random_other_direction(Direction::Up, &mut rng), Direction::Up);
        }
    }

    #[test]
    fn test_already_facing_primary_is_uniform_under_bias() {
        let behavior = StationaryBehavior {
            primary_direction: Direction::Left,
            rotation_speed: 45.0,
            primary_direction_chance: 0.85,
        };
        let mut rng = rng();
        let mut counts = [0usize; 4];
        let trials = 10_000;
        for _ in 0..trials {
            let next = behavior.next_direction(Direction::Left, &mut rng);
            let i = Direction::CLOCKWISE.iter().position(|d| *d == next).unwrap();
            counts[i] += 1;
        }
        for (d, count) in Direction::CLOCKWISE.iter().zip(counts) {
            let fraction = count as f64 / trials as f64;
            if *d == Direction::Left {
                assert_eq!(count, 0, "never keeps its facing");
            } else {
                assert!((fraction - 1.0 / 3.0).abs() < 0.03, "{d:?}: {fraction}");
            }
        }
    }

    // --- Patrol behavior ---

    fn patrol_tuning() -> GuardTuning {
        // One tile per second
        GuardTuning {
            patrol_speed: 32.0,
            ..GuardTuning::default()
        }
    }

    #[test]
    fn test_patrol_cycles_waypoints() {
        let waypoints = vec![Vec2::new(5.0, 5.0), Vec2::new(8.0, 5.0), Vec2::new(8.0, 7.0)];
        let mut guard = Guard::patrol(GuardSpec::at(5.0, 5.0, Direction::Down), waypoints, patrol_tuning());
        let mut rng = rng();
        let none = Surroundings::default();

        let mut visited = Vec::new();
        let mut last = guard.route().unwrap().current_index();
        for _ in 0..200 {
            guard.update(STEP, &none, &mut rng);
            let index = guard.route().unwrap().current_index();
            if index != last {
                visited.push(index);
                last = index;
            }
        }
        assert!(visited.len() >= 6, "visited {visited:?}");
        for (i, index) in visited.iter().enumerate() {
            assert_eq!(*index, (i + 1) % 3, "visited {visited:?}");
        }
        assert_eq!(guard.state_name(), GuardStateName::Patrol);
    }

    #[test]
    fn test_patrol_facing_follows_movement() {
        let waypoints = vec![Vec2::new(5.0, 5.0), Vec2::new(8.0, 5.0), Vec2::new(8.0, 7.0)];
        let mut guard = Guard::patrol(GuardSpec::at(5.0, 5.0, Direction::Up), waypoints, patrol_tuning());
        let mut rng = rng();
        let none = Surroundings::default();

        // Frame 1 retargets at the start waypoint, frame 2 starts walking
        run(&mut guard, 2, &none, &mut rng);
        assert_eq!(guard.direction(), Direction::Right);
        assert_eq!(guard.vision().heading(), 0.0, "patrol cones snap");
        assert_eq!(guard.position(), Vec2::new(5.25, 5.0));
        assert_eq!(guard.sprite_sheet(), SpriteSheet::GuardWalk);

        // 3 tiles at 0.25 per frame, then one frame to retarget, then down
        run(&mut guard, 11 + 1 + 1, &none, &mut rng);
        assert_eq!(guard.position(), Vec2::new(8.0, 5.25));
        assert_eq!(guard.direction(), Direction::Down);
        assert_eq!(guard.vision().heading(), 90.0);
    }

    #[test]
    fn test_patrol_never_overshoots() {
        let tuning = GuardTuning {
            patrol_speed: 32.0 * 100.0,
            ..GuardTuning::default()
        };
        let waypoints = vec![Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)];
        let mut guard = Guard::patrol(GuardSpec::at(0.0, 0.0, Direction::Down), waypoints, tuning);
        let mut rng = rng();
        run(&mut guard, 2, &Surroundings::default(), &mut rng);
        assert_eq!(guard.position(), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_zero_waypoint_epsilon_keeps_position_finite() {
        let tuning = GuardTuning {
            waypoint_epsilon_tiles: 0.0,
            ..patrol_tuning()
        };
        let waypoints = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        let mut guard = Guard::patrol(GuardSpec::at(0.0, 0.0, Direction::Down), waypoints, tuning);
        let mut rng = rng();

        // Spawned on waypoint 0: retarget, then four quarter-tile steps
        run(&mut guard, 5, &Surroundings::default(), &mut rng);
        assert_eq!(guard.position(), Vec2::new(1.0, 0.0));

        // Twenty tiles below the route: never in range
        let player = PlayerSnapshot::at_tile(0, 20, false);
        run(&mut guard, 40, &Surroundings::new(Some(&player), None), &mut rng);
        assert!(guard.position().is_finite(), "position {:?}", guard.position());
        assert!(!guard.is_alert());
    }

    #[test]
    fn test_patrol_without_waypoints_is_inert() {
        let mut guard = Guard::patrol(GuardSpec::at(3.0, 4.0, Direction::Left), Vec::new(), patrol_tuning());
        let mut rng = rng();
        let signals = run(&mut guard, 50, &Surroundings::default(), &mut rng);
        assert!(signals.is_empty());
        assert_eq!(guard.position(), Vec2::new(3.0, 4.0));
        assert_eq!(guard.direction(), Direction::Left);
        assert_eq!(guard.state_name(), GuardStateName::Patrol);
    }

    // --- Detection and alert ---

    #[test]
    fn test_detection_enters_alert_same_frame() {
        let mut guard = stationary_at(5.0, 5.0, Direction::Down, Direction::Down);
        let mut rng = rng();
        let player = PlayerSnapshot::at_tile(5, 7, false);
        let seen = Surroundings::new(Some(&player), None);

        let signals = guard.update(STEP, &seen, &mut rng);
        assert!(guard.is_alert());
        assert_eq!(
            signals,
            vec![
                GuardSignal::StateChanged {
                    from: GuardStateName::Idle,
                    to: GuardStateName::Alert,
                },
                GuardSignal::Alerted {
                    position: Vec2::new(5.0, 5.0),
                },
            ]
        );
    }

    #[test]
    fn test_alert_catches_once_after_delay() {
        let mut guard = stationary_at(5.0, 5.0, Direction::Down, Direction::Down);
        let mut rng = rng();
        let player = PlayerSnapshot::at_tile(5, 7, true);
        let seen = Surroundings::new(Some(&player), None);

        guard.update(STEP, &seen, &mut rng);
        assert!(guard.is_alert());

        // 1.75 s after the alert: not yet
        let signals = run(&mut guard, 7, &seen, &mut rng);
        assert!(!signals.contains(&GuardSignal::PlayerCaught));

        // 2.0 s: caught, and never again
        let signals = run(&mut guard, 1, &seen, &mut rng);
        assert_eq!(signals, vec![GuardSignal::PlayerCaught]);
        let signals = run(&mut guard, 40, &seen, &mut rng);
        assert!(signals.is_empty(), "unexpected {signals:?}");
        assert!(guard.is_alert());
    }

    #[test]
    fn test_alert_freezes_guard() {
        let waypoints = vec![Vec2::new(5.0, 5.0), Vec2::new(5.0, 9.0)];
        let mut guard = Guard::patrol(GuardSpec::at(5.0, 5.0, Direction::Down), waypoints, patrol_tuning());
        let mut rng = rng();
        let signals = guard.alert();
        assert_eq!(entries_into(&signals, GuardStateName::Alert), 1);
        run(&mut guard, 20, &Surroundings::default(), &mut rng);
        assert_eq!(guard.position(), Vec2::new(5.0, 5.0));
        assert_eq!(guard.sprite_sheet(), SpriteSheet::GuardIdle);
    }

    #[test]
    fn test_alert_is_idempotent() {
        let mut guard = stationary_at(0.0, 0.0, Direction::Up, Direction::Up);
        assert!(!guard.alert().is_empty());
        assert!(guard.alert().is_empty());
        assert_eq!(guard.state_name(), GuardStateName::Alert);
    }

    #[test]
    fn test_crouching_shrinks_range() {
        // Three tiles ahead: 96 px. Standing range 152, crouching 91.2.
        let player_standing = PlayerSnapshot::at_tile(5, 8, false);
        let player_crouching = PlayerSnapshot::at_tile(5, 8, true);
        let mut rng = rng();

        let mut guard = stationary_at(5.0, 5.0, Direction::Down, Direction::Down);
        guard.update(STEP, &Surroundings::new(Some(&player_crouching), None), &mut rng);
        assert!(!guard.is_alert());
        assert!((guard.vision().range() - 152.0 * 0.6).abs() < 1e-3);

        guard.update(STEP, &Surroundings::new(Some(&player_standing), None), &mut rng);
        assert!(guard.is_alert());
    }

    #[test]
    fn test_player_behind_not_detected() {
        let mut guard = stationary_at(5.0, 5.0, Direction::Down, Direction::Down);
        let player = PlayerSnapshot::at_tile(5, 4, false);
        let mut rng = rng();
        run(&mut guard, 10, &Surroundings::new(Some(&player), None), &mut rng);
        assert!(!guard.is_alert());
    }

    #[test]
    fn test_wall_blocks_detection() {
        let mut grid = CollisionGrid::open(12, 12);
        grid.set_solid(5, 6, true);
        let player = PlayerSnapshot::at_tile(5, 7, false);
        let mut rng = rng();

        let mut guard = stationary_at(5.0, 5.0, Direction::Down, Direction::Down);
        run(&mut guard, 5, &Surroundings::new(Some(&player), Some(&grid)), &mut rng);
        assert!(!guard.is_alert());

        grid.set_solid(5, 6, false);
        run(&mut guard, 1, &Surroundings::new(Some(&player), Some(&grid)), &mut rng);
        assert!(guard.is_alert());
    }

    #[test]
    fn test_no_player_skips_detection() {
        let mut guard = stationary_at(5.0, 5.0, Direction::Down, Direction::Down);
        let mut rng = rng();
        let signals = run(&mut guard, 200, &Surroundings::default(), &mut rng);
        assert_eq!(entries_into(&signals, GuardStateName::Alert), 0);
        assert!(!guard.is_alert());
    }

    #[test]
    fn test_detection_preempts_rotation() {
        let tuning = GuardTuning {
            primary_direction_chance: 1.0,
            ..GuardTuning::default()
        };
        let mut guard = Guard::stationary(GuardSpec::at(5.0, 5.0, Direction::Down), Direction::Right, tuning);
        let mut rng = rng();
        run(&mut guard, 28, &Surroundings::default(), &mut rng);
        assert_eq!(guard.state_name(), GuardStateName::Rotating);

        // Two tiles to the right: inside the cone once it finishes turning
        let player = PlayerSnapshot::at_tile(7, 5, false);
        let signals = run(&mut guard, 1, &Surroundings::new(Some(&player), None), &mut rng);
        assert!(signals.contains(&GuardSignal::StateChanged {
            from: GuardStateName::Rotating,
            to: GuardStateName::Alert,
        }));
        assert!(guard.is_alert());
        assert_eq!(guard.direction(), Direction::Right);
    }

    #[test]
    fn test_patrol_detects_with_post_move_cone() {
        // Walking right toward the player; the start facing (down) cannot see them
        let waypoints = vec![Vec2::new(5.0, 5.0), Vec2::new(10.0, 5.0)];
        let mut guard = Guard::patrol(GuardSpec::at(5.0, 5.0, Direction::Down), waypoints, patrol_tuning());
        let player = PlayerSnapshot::at_tile(9, 5, false);
        let seen = Surroundings::new(Some(&player), None);
        let mut rng = rng();

        guard.update(STEP, &seen, &mut rng);
        assert!(!guard.is_alert());
        guard.update(STEP, &seen, &mut rng);
        assert!(guard.is_alert());
        assert_eq!(guard.position(), Vec2::new(5.25, 5.0));
    }

    #[test]
    fn test_guard_view() {
        let guard = stationary_at(2.0, 3.0, Direction::Left, Direction::Left);
        let view = guard.view(heist_core::components::GuardId(4));
        assert_eq!(view.state, GuardStateName::Idle);
        assert_eq!(view.frame, 12);
        assert_eq!(view.cone.heading, 180.0);
        assert_eq!(view.cone.vertices[0], grid_to_pixel_center(Vec2::new(2.0, 3.0)));
    }
}
