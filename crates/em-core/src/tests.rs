//! Unit tests for em-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_matches_inner() {
        assert_eq!(AgentId(42).index(), 42);
    }

    #[test]
    fn ordered_by_creation() {
        assert!(AgentId(1) < AgentId(2));
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Direction, GridBounds, Position};

    const GRID: GridBounds = GridBounds::new(9, 9);

    #[test]
    fn up_at_top_edge_is_blocked() {
        let p = Position::new(3, 0);
        assert_eq!(p.step(Direction::Up, GRID), p);
    }

    #[test]
    fn steps_clamp_on_every_edge() {
        assert_eq!(Position::new(0, 4).step(Direction::Left, GRID), Position::new(0, 4));
        assert_eq!(Position::new(8, 4).step(Direction::Right, GRID), Position::new(8, 4));
        assert_eq!(Position::new(4, 8).step(Direction::Down, GRID), Position::new(4, 8));
    }

    #[test]
    fn interior_steps_move_one_cell() {
        let p = Position::new(4, 4);
        assert_eq!(p.step(Direction::Up, GRID), Position::new(4, 3));
        assert_eq!(p.step(Direction::Down, GRID), Position::new(4, 5));
        assert_eq!(p.step(Direction::Left, GRID), Position::new(3, 4));
        assert_eq!(p.step(Direction::Right, GRID), Position::new(5, 4));
    }

    #[test]
    fn chebyshev_is_max_axis_delta() {
        assert_eq!(Position::new(0, 0).chebyshev(Position::new(2, 1)), 2);
        assert_eq!(Position::new(5, 5).chebyshev(Position::new(2, 6)), 3);
        assert_eq!(Position::new(1, 1).chebyshev(Position::new(1, 1)), 0);
    }

    #[test]
    fn neighborhood_is_clipped_at_corner() {
        let cells: Vec<_> = GRID.neighborhood(Position::new(0, 0), 1).collect();
        assert_eq!(
            cells,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn neighborhood_interior_has_nine_cells() {
        assert_eq!(GRID.neighborhood(Position::new(4, 4), 1).count(), 9);
    }

    #[test]
    fn index_roundtrip() {
        let p = Position::new(3, 7);
        assert_eq!(GRID.position_of(GRID.index_of(p)), p);
        assert_eq!(GRID.positions().count(), GRID.area());
    }

    #[test]
    fn direction_parse_is_case_insensitive() {
        assert_eq!(" up ".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("Right".parse::<Direction>().unwrap(), Direction::Right);
        assert!("NORTH".parse::<Direction>().is_err());
    }
}

#[cfg(test)]
mod time {
    use crate::Step;

    #[test]
    fn step_arithmetic() {
        assert_eq!(Step(3).next(), Step(4));
        assert_eq!(Step(3) + 2, Step(5));
        assert_eq!(Step(12).to_string(), "S12");
    }

    #[test]
    fn is_every_fires_on_multiples_including_zero() {
        assert!(Step(0).is_every(5));
        assert!(!Step(4).is_every(5));
        assert!(Step(10).is_every(5));
        assert!(!Step(0).is_every(0));
    }
}

#[cfg(test)]
mod config {
    use crate::{EmError, MarketConfig};

    #[test]
    fn default_is_valid_nine_by_nine() {
        let cfg = MarketConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.bounds().area(), 81);
        assert_eq!(cfg.initial_grid_energy(), 200);
        assert_eq!(cfg.replenish_target(), 200);
    }

    #[test]
    fn zero_width_rejected() {
        let cfg = MarketConfig { width: 0, ..MarketConfig::default() };
        assert!(matches!(cfg.validate(), Err(EmError::Config(_))));
    }

    #[test]
    fn probability_out_of_range_rejected() {
        let cfg = MarketConfig { red_probability: 1.5, ..MarketConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_retry_budget_rejected() {
        let cfg = MarketConfig { replenish_retry_budget: 0, replenish_interval: 1, ..MarketConfig::default() };
        assert!(matches!(cfg.validate(), Err(EmError::Config(_))));
    }

    #[test]
    fn tiny_replenish_target_rejected() {
        let cfg = MarketConfig {
            total_energy_added_per_turn: 1,
            replenish_interval:          2,
            ..MarketConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            assert_eq!(r1.gen_range(0..1000u32), r2.gen_range(0..1000u32));
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: Vec<u32> = (0..8).map(|_| r0.gen_range(0..u32::MAX)).collect();
        let b: Vec<u32> = (0..8).map(|_| r1.gen_range(0..u32::MAX)).collect();
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = AgentRng::new(0, AgentId(0));
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
