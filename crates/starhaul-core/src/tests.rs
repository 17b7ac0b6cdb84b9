#[cfg(test)]
mod tests {
    use crate::commands::{CommandQueue, PlayerCommand, UnitCommand};
    use crate::components::{Asteroid, Resource, Unit};
    use crate::config::{ConfigError, SimConfig};
    use crate::constants::*;
    use crate::enums::*;
    use crate::types::{reflect, Handle, SimTime, Vec2};

    fn mv(x: f32) -> UnitCommand {
        UnitCommand::Move {
            destination: Vec2::new(x, 0.0),
        }
    }

    fn patrol(x: f32) -> UnitCommand {
        UnitCommand::Patrol {
            destination: Vec2::new(x, 0.0),
        }
    }

    // ---- Command queue ----

    #[test]
    fn test_replace_makes_last_issued_current() {
        let mut queue = CommandQueue::default();
        for i in 0..10 {
            queue.replace(mv(i as f32));
            assert_eq!(queue.current(), Some(&mv(i as f32)));
            assert_eq!(queue.len(), 1);
        }
    }

    #[test]
    fn test_decoded_queue_bounds_are_checked() {
        let mut queue = CommandQueue::default();
        queue.push(mv(1.0));
        assert!(queue.is_well_formed());

        let mut raw = serde_json::to_value(&queue).unwrap();
        raw["len"] = (MAX_COMMANDS + 1).into();
        let too_long: CommandQueue = serde_json::from_value(raw).unwrap();
        assert!(!too_long.is_well_formed());

        let mut raw = serde_json::to_value(&queue).unwrap();
        raw["cursor"] = 2.into();
        let past_end: CommandQueue = serde_json::from_value(raw).unwrap();
        assert!(!past_end.is_well_formed());
    }

    #[test]
    fn test_push_appends_in_order_and_drops_beyond_capacity() {
        let mut queue = CommandQueue::default();
        for i in 0..MAX_COMMANDS + 5 {
            let accepted = queue.push(mv(i as f32));
            assert_eq!(accepted, i < MAX_COMMANDS);
        }
        assert_eq!(queue.len(), MAX_COMMANDS);
        for (i, cmd) in queue.entries().iter().enumerate() {
            assert_eq!(*cmd, mv(i as f32));
        }
    }

    #[test]
    fn test_advance_past_end_empties_queue() {
        let mut queue = CommandQueue::default();
        queue.push(mv(1.0));
        queue.push(mv(2.0));
        queue.advance();
        assert_eq!(queue.current(), Some(&mv(2.0)));
        queue.advance();
        assert!(queue.is_empty());
        assert!(queue.current().is_none());
    }

    #[test]
    fn test_push_after_finished_queue_restarts() {
        let mut queue = CommandQueue::default();
        queue.push(mv(1.0));
        queue.advance();
        assert!(queue.push(mv(5.0)));
        assert_eq!(queue.cursor(), 0);
        assert_eq!(queue.current(), Some(&mv(5.0)));
    }

    #[test]
    fn test_patrol_run_wraps_to_first_waypoint() {
        let mut queue = CommandQueue::default();
        queue.push(mv(0.0));
        queue.push(patrol(1.0));
        queue.push(patrol(2.0));
        queue.push(patrol(3.0));
        queue.advance();
        assert_eq!(queue.current(), Some(&patrol(1.0)));

        queue.advance_patrol();
        assert_eq!(queue.current(), Some(&patrol(2.0)));
        queue.advance_patrol();
        assert_eq!(queue.current(), Some(&patrol(3.0)));
        queue.advance_patrol();
        assert_eq!(
            queue.current(),
            Some(&patrol(1.0)),
            "Patrol should wrap to the first waypoint of its run, not the Move"
        );
    }

    #[test]
    fn test_single_queued_patrol_loops_with_previous_waypoint() {
        let mut queue = CommandQueue::default();
        queue.push(mv(5.0));
        queue.push(patrol(9.0));
        queue.advance();
        assert_eq!(queue.current(), Some(&patrol(9.0)));

        queue.advance_patrol();
        assert_eq!(queue.current(), Some(&patrol(5.0)));
        queue.advance_patrol();
        assert_eq!(queue.current(), Some(&patrol(9.0)));
        queue.advance_patrol();
        assert_eq!(queue.current(), Some(&patrol(5.0)));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_lone_patrol_without_previous_waypoint_moves_on() {
        let mut queue = CommandQueue::default();
        queue.push(patrol(9.0));
        queue.push(mv(3.0));
        queue.advance_patrol();
        assert_eq!(queue.current(), Some(&mv(3.0)));

        let mut lone = CommandQueue::default();
        lone.push(patrol(9.0));
        lone.advance_patrol();
        assert!(lone.current().is_none());
    }

    #[test]
    fn test_remove_current_keeps_following_entries() {
        let mut queue = CommandQueue::default();
        queue.push(mv(1.0));
        queue.push(mv(2.0));
        queue.push(mv(3.0));
        queue.advance();
        queue.remove_current();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current(), Some(&mv(3.0)));
        queue.remove_current();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_replace_many_sets_cursor() {
        let mut queue = CommandQueue::default();
        queue.replace_many(&[patrol(0.0), patrol(10.0)], 1);
        assert_eq!(queue.current(), Some(&patrol(10.0)));
        queue.advance_patrol();
        assert_eq!(queue.current(), Some(&patrol(0.0)));
    }

    // ---- Entities ----

    #[test]
    fn test_unit_new_uses_stats_maxima() {
        let miner = Unit::new(UnitType::Miner, Vec2::ZERO);
        let stats = UnitType::Miner.stats();
        assert_eq!(miner.health, stats.max_health);
        assert_eq!(miner.max_cargo, 1000.0);
        assert_eq!(miner.cargo, 0.0);
        assert!(!miner.cargo_full());

        let mothership = Unit::new(UnitType::Mothership, Vec2::ZERO);
        assert!(!mothership.cargo_full(), "Mothership cargo is unbounded");
    }

    #[test]
    fn test_asteroid_health_scales_with_radius() {
        let asteroid = Asteroid::new(Vec2::ZERO, Vec2::ZERO, 50.0, ASTEROID_HEALTH_MULTIPLIER);
        assert_eq!(asteroid.health, 500.0);
        assert_eq!(asteroid.max_health, 500.0);
        assert!((asteroid.hitbox() - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_resource_yield_matches_health() {
        let crystal = Resource::new(Vec2::ZERO, 20.0);
        assert_eq!(crystal.amount, crystal.health);
        assert!(crystal.visual_radius() > crystal.radius);
    }

    #[test]
    fn test_stats_capabilities() {
        assert!(UnitType::Mothership.stats().has_main_cannon());
        assert!(UnitType::Fighter.stats().has_main_cannon());
        assert!(!UnitType::Miner.stats().has_main_cannon());
        assert!(UnitType::Miner.stats().can_mine());
        assert!(!UnitType::Scout.stats().can_mine());
        for ty in [
            UnitType::Mothership,
            UnitType::Scout,
            UnitType::Miner,
            UnitType::Fighter,
        ] {
            assert!(ty.stats().small_cannons <= SMALL_CANNON_SLOTS);
        }
    }

    // ---- Types ----

    #[test]
    fn test_handle_equality_includes_generation() {
        let a: Handle<Asteroid> = Handle::new(3, 0);
        let b: Handle<Asteroid> = Handle::new(3, 1);
        assert_ne!(a, b);
        assert_eq!(a, Handle::new(3, 0));
    }

    #[test]
    fn test_reflect_off_normal() {
        let out = reflect(Vec2::new(-1.0, -1.0), Vec2::new(0.0, 1.0));
        assert!((out - Vec2::new(-1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..10 {
            time.advance(0.1);
        }
        assert_eq!(time.tick, 10);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-5);
    }

    // ---- Serde ----

    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::Schedule {
                command: UnitCommand::Gather {
                    resource: Handle::new(2, 7),
                },
                queued: true,
            },
            PlayerCommand::SetBehavior {
                mode: BehaviorMode::HoldGround,
            },
            PlayerCommand::SetProduction {
                mode: ProductionMode::Fighter,
            },
            PlayerCommand::Pause,
        ];
        for cmd in commands {
            let json = serde_json::to_string(&cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(format!("{cmd:?}"), format!("{back:?}"));
        }
    }

    // ---- Config ----

    #[test]
    fn test_config_partial_toml_keeps_defaults() {
        let config = SimConfig::from_toml_str("seed = 7\nasteroid_spawning = false\n").unwrap();
        assert_eq!(config.seed, 7);
        assert!(!config.asteroid_spawning);
        assert_eq!(config.despawn_radius, DESPAWN_RADIUS);
        assert_eq!(config.unit_cap, DEFAULT_UNIT_CAP);
    }

    #[test]
    fn test_default_config_scans_on_worker() {
        assert!(!SimConfig::default().inline_targeting);
        let config = SimConfig::from_toml_str("inline_targeting = true\n").unwrap();
        assert!(config.inline_targeting);
    }

    #[test]
    fn test_config_rejects_bad_dt() {
        let err = SimConfig::from_toml_str("dt = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "dt", .. }));
    }

    #[test]
    fn test_config_rejects_inverted_annulus() {
        let err =
            SimConfig::from_toml_str("spawn_min_distance = 900.0\nspawn_max_distance = 100.0\n")
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_config_parse_error() {
        let err = SimConfig::from_toml_str("seed = \"not a number\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
