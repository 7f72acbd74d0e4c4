//! Tests for the forage demo: configuration, the scripted oracle, rendering.

use em_core::{AgentId, AgentRng, Direction, GridBounds, Position, Step};

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use crate::config::ForageConfig;

    use super::*;

    #[test]
    fn defaults_place_four_agents_in_quadrants() {
        let config = ForageConfig::default();
        let positions: Vec<_> = config.agents.iter().filter_map(|a| a.position).collect();
        assert_eq!(
            positions,
            [Position::new(2, 2), Position::new(6, 2), Position::new(2, 6), Position::new(6, 6)]
        );
        assert_eq!(config.market.width, 9);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ForageConfig::from_toml(
            r#"
            garble_rate = 0.5

            [market]
            seed = 7
            fallback = { kind = "move", direction = "DOWN" }

            [[agents]]
            name = "Solo"
            persona = "Cooperative"
            energy = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.market.seed, 7);
        assert_eq!(config.market.width, 9);
        assert_eq!(config.market.fallback, em_core::FallbackDecision::Move(Direction::Down));
        assert_eq!(config.agents.len(), 1);
        assert_eq!(config.agents[0].energy, Some(30));
        assert_eq!(config.agents[0].position, None);
        assert_eq!(config.render_every, 10);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(ForageConfig::from_toml("[market]\nwidth = 0\n").is_err());
        assert!(ForageConfig::from_toml("garble_rate = 2.0\n").is_err());
        assert!(ForageConfig::from_toml("render_every = \"often\"\n").is_err());
    }

    #[test]
    fn shipped_config_parses() {
        let text = include_str!("../forage.toml");
        let config = ForageConfig::from_toml(text).unwrap();
        assert_eq!(config.agents.len(), 4);
        assert_eq!(config.market.max_steps, 1000);
    }
}

// ── Scripted oracle ───────────────────────────────────────────────────────────

#[cfg(test)]
mod oracle_tests {
    use em_behavior::{
        CellView, Decision, DecisionContext, DecisionOracle, NeighborView, SelfView, TradeContext,
        TradeOffer,
    };

    use crate::oracle::{MockMind, toward};

    use super::*;

    fn me(energy: i64, persona: &str) -> SelfView {
        SelfView {
            name: "Agent_1".into(),
            persona: persona.into(),
            position: Position::new(4, 4),
            energy,
            energy_loss_per_turn: 2,
        }
    }

    fn neighbor(energy: i64) -> NeighborView {
        NeighborView { name: "Agent_2".into(), persona: "x".into(), position: Position::new(5, 4), energy }
    }

    fn context(energy: i64, cells: Vec<CellView>, neighbors: Vec<NeighborView>) -> DecisionContext {
        DecisionContext {
            step: Step(1),
            grid: GridBounds::new(9, 9),
            me: me(energy, "Risk-averse"),
            cells,
            neighbors,
        }
    }

    fn food_at(x: u32, y: u32) -> CellView {
        CellView { position: Position::new(x, y), red_food: 1, green_food: 0, energy: 50 }
    }

    #[test]
    fn heads_for_visible_food() {
        let mut mind = MockMind::new(0.0);
        let mut rng = AgentRng::new(1, AgentId(0));
        let ctx = context(60, vec![food_at(3, 4)], vec![]);
        assert_eq!(mind.decide(&ctx, &mut rng).unwrap(), Decision::move_to(Direction::Left));
    }

    #[test]
    fn rich_agent_offers_to_poor_neighbor() {
        let mut mind = MockMind::new(0.0);
        let mut rng = AgentRng::new(1, AgentId(0));
        let ctx = context(100, vec![], vec![neighbor(20)]);
        assert_eq!(mind.decide(&ctx, &mut rng).unwrap(), Decision::trade(20, "Agent_2"));
    }

    #[test]
    fn always_garbled_means_always_malformed() {
        let mut mind = MockMind::new(1.0);
        let mut rng = AgentRng::new(1, AgentId(0));
        assert!(mind.decide(&context(60, vec![], vec![]), &mut rng).is_err());
    }

    #[test]
    fn verdicts_follow_hunger_and_persona() {
        let mut mind = MockMind::new(0.0);
        let mut rng = AgentRng::new(1, AgentId(0));
        let trade = |energy: i64, persona: &str| TradeContext {
            step: Step(1),
            offer: TradeOffer { from: "Agent_2".into(), to: "Agent_1".into(), amount: 5 },
            me: me(energy, persona),
            proposer: neighbor(90),
        };
        assert!(mind.evaluate_trade(&trade(20, "Risk-averse"), &mut rng).unwrap().accepted);
        assert!(mind.evaluate_trade(&trade(90, "Cooperative"), &mut rng).unwrap().accepted);
        let verdict = mind.evaluate_trade(&trade(90, "Competitive"), &mut rng).unwrap();
        assert!(!verdict.accepted);
        assert!(!verdict.reason.is_empty());
    }

    #[test]
    fn toward_prefers_larger_axis() {
        let from = Position::new(4, 4);
        assert_eq!(toward(from, Position::new(4, 4)), None);
        assert_eq!(toward(from, Position::new(7, 5)), Some(Direction::Right));
        assert_eq!(toward(from, Position::new(5, 1)), Some(Direction::Up));
        assert_eq!(toward(from, Position::new(3, 6)), Some(Direction::Down));
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod render_tests {
    use em_agent::AgentSeed;
    use em_behavior::WaitOracle;
    use em_core::MarketConfig;
    use em_sim::{NoopObserver, SimBuilder};

    use crate::render::render;

    use super::*;

    #[test]
    fn frame_shows_agents_and_status_lines() {
        let config = MarketConfig { width: 5, height: 3, max_steps: 1, ..MarketConfig::default() };
        let mut sim = SimBuilder::new(config, WaitOracle)
            .agents(vec![
                AgentSeed::new("Agent_1", "Risk-averse").at(Position::new(0, 0)),
                AgentSeed::new("Agent_2", "Cooperative").at(Position::new(4, 2)),
            ])
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        let frame = render(&sim.snapshot());
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 1 + 3 + 2);
        assert!(lines[1].starts_with("1 "));
        assert!(lines[3].ends_with("2 "));
        assert!(lines[4].contains("Agent_1") && lines[4].contains("WAIT"));
    }
}
