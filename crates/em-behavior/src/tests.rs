//! Unit tests for em-behavior.

use em_core::{AgentId, AgentRng, Direction, GridBounds, Position, Step};

use crate::{
    CellView, Decision, DecisionContext, DecisionOracle, NeighborView, OracleError, SelfView,
    TradeContext, TradeOffer, WaitOracle,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn me() -> SelfView {
    SelfView {
        name:                 "Agent_1".into(),
        persona:              "Risk-averse".into(),
        position:             Position::new(4, 4),
        energy:               40,
        energy_loss_per_turn: 2,
    }
}

fn make_context() -> DecisionContext {
    DecisionContext {
        step:      Step(3),
        grid:      GridBounds::new(9, 9),
        me:        me(),
        cells:     vec![CellView { position: Position::new(4, 4), red_food: 1, green_food: 0, energy: 50 }],
        neighbors: vec![NeighborView {
            name:     "Agent_2".into(),
            persona:  "Cooperative".into(),
            position: Position::new(5, 5),
            energy:   12,
        }],
    }
}

fn make_trade_context() -> TradeContext {
    TradeContext {
        step:     Step(3),
        offer:    TradeOffer { from: "Agent_2".into(), to: "Agent_1".into(), amount: 4 },
        me:       me(),
        proposer: NeighborView {
            name:     "Agent_2".into(),
            persona:  "Cooperative".into(),
            position: Position::new(5, 5),
            energy:   12,
        },
    }
}

// ── parse_decision ────────────────────────────────────────────────────────────

#[cfg(test)]
mod parse_decision_tests {
    use crate::parse_decision;

    use super::*;

    #[test]
    fn simple_actions() {
        assert_eq!(parse_decision("<ACTION>\nGATHER\n</ACTION>").unwrap(), Decision::Gather);
        assert_eq!(parse_decision("<ACTION>wait</ACTION>").unwrap(), Decision::Wait);
        assert_eq!(
            parse_decision("Sure!\n<ACTION>\n  move   left \n</ACTION>").unwrap(),
            Decision::move_to(Direction::Left)
        );
    }

    #[test]
    fn trade_offer_with_food_or_energy_unit() {
        let text = "<TRADE_OFFER>\noffer: 4 food\nto: Agent_2\n</TRADE_OFFER>";
        assert_eq!(parse_decision(text).unwrap(), Decision::trade(4, "Agent_2"));
        let text = "<TRADE_OFFER>offer: 12 energy to: Agent_3</TRADE_OFFER>";
        assert_eq!(parse_decision(text).unwrap(), Decision::trade(12, "Agent_3"));
    }

    #[test]
    fn incomplete_trade_falls_back_to_action_block() {
        let text = "<TRADE_OFFER>offer: some</TRADE_OFFER><ACTION>GATHER</ACTION>";
        assert_eq!(parse_decision(text).unwrap(), Decision::Gather);
    }

    #[test]
    fn unknown_action_is_malformed() {
        assert!(matches!(
            parse_decision("<ACTION>DANCE</ACTION>"),
            Err(OracleError::Malformed { .. })
        ));
        assert!(matches!(
            parse_decision("<ACTION>MOVE NORTH</ACTION>"),
            Err(OracleError::Malformed { .. })
        ));
    }

    #[test]
    fn untagged_text_is_malformed_and_keeps_raw() {
        match parse_decision("I think I will gather.") {
            Err(OracleError::Malformed { raw, .. }) => assert_eq!(raw, "I think I will gather."),
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn overflowing_amount_is_malformed() {
        let text = "<TRADE_OFFER>offer: 99999999999999999999999 to: B</TRADE_OFFER>";
        assert!(parse_decision(text).is_err());
    }
}

// ── parse_verdict ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod parse_verdict_tests {
    use crate::{parse_verdict, NO_REASON};

    #[test]
    fn accept_with_reason() {
        let v = parse_verdict("<DECISION>\nACCEPT\n</DECISION>\n<REASON>\nI am hungry\n</REASON>").unwrap();
        assert!(v.accepted);
        assert_eq!(v.reason, "I am hungry");
    }

    #[test]
    fn reject_without_reason_gets_placeholder() {
        let v = parse_verdict("<DECISION>reject</DECISION>").unwrap();
        assert!(!v.accepted);
        assert_eq!(v.reason, NO_REASON);
    }

    #[test]
    fn missing_decision_is_malformed() {
        assert!(parse_verdict("<REASON>hmm</REASON>").is_err());
        assert!(parse_verdict("<DECISION>MAYBE</DECISION>").is_err());
    }
}

// ── Decision ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod decision_tests {
    use em_core::FallbackDecision;

    use super::*;

    #[test]
    fn fallback_conversion() {
        assert_eq!(Decision::from(FallbackDecision::Wait), Decision::Wait);
        assert_eq!(
            Decision::from(FallbackDecision::Move(Direction::Down)),
            Decision::move_to(Direction::Down)
        );
    }

    #[test]
    fn display_matches_tag_vocabulary() {
        assert_eq!(Decision::move_to(Direction::Up).to_string(), "MOVE UP");
        assert_eq!(Decision::trade(3, "B").to_string(), "TRADE_OFFER 3 to B");
    }
}

// ── Context ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod context_tests {
    use super::*;

    #[test]
    fn current_cell_and_neighbor_lookup() {
        let ctx = make_context();
        assert_eq!(ctx.current_cell().map(|c| c.energy), Some(50));
        assert!(ctx.neighbor("Agent_2").is_some());
        assert!(ctx.neighbor("Agent_9").is_none());
    }

    #[test]
    fn json_exposes_public_state() {
        let json = make_context().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["me"]["name"], "Agent_1");
        assert_eq!(value["neighbors"][0]["persona"], "Cooperative");
        assert_eq!(value["cells"][0]["red_food"], 1);
    }
}

// ── Oracles ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod oracle_tests {
    use crate::{OracleResult, TaggedTextOracle};

    use super::*;

    #[test]
    fn wait_oracle_waits_and_rejects() {
        let mut rng = AgentRng::new(0, AgentId(0));
        let mut oracle = WaitOracle;
        assert_eq!(oracle.decide(&make_context(), &mut rng).unwrap(), Decision::Wait);
        assert!(!oracle.evaluate_trade(&make_trade_context(), &mut rng).unwrap().accepted);
    }

    #[test]
    fn boxed_oracle_is_object_safe() {
        let mut oracle: Box<dyn DecisionOracle> = Box::new(WaitOracle);
        let mut rng = AgentRng::new(0, AgentId(0));
        assert_eq!(oracle.decide(&make_context(), &mut rng).unwrap(), Decision::Wait);
    }

    #[test]
    fn tagged_text_oracle_parses_backend_reply() {
        let backend = |prompt: &str, _rng: &mut AgentRng| -> OracleResult<String> {
            assert!(prompt.contains("Agent_1"));
            Ok("<ACTION>GATHER</ACTION>".to_string())
        };
        let mut oracle = TaggedTextOracle::new(backend);
        let mut rng = AgentRng::new(0, AgentId(0));
        assert_eq!(oracle.decide(&make_context(), &mut rng).unwrap(), Decision::Gather);
    }

    #[test]
    fn tagged_text_oracle_surfaces_malformed_reply() {
        let backend = |_: &str, _: &mut AgentRng| -> OracleResult<String> { Ok("no idea".into()) };
        let mut oracle = TaggedTextOracle::new(backend);
        let mut rng = AgentRng::new(0, AgentId(0));
        assert!(matches!(
            oracle.decide(&make_context(), &mut rng),
            Err(OracleError::Malformed { .. })
        ));
    }

    #[test]
    fn tagged_text_oracle_evaluates_trades() {
        let backend = |prompt: &str, _: &mut AgentRng| -> OracleResult<String> {
            assert!(prompt.contains("offers to give you 4 energy"));
            Ok("<DECISION>ACCEPT</DECISION><REASON>thanks</REASON>".into())
        };
        let mut oracle = TaggedTextOracle::new(backend);
        let mut rng = AgentRng::new(0, AgentId(0));
        let verdict = oracle.evaluate_trade(&make_trade_context(), &mut rng).unwrap();
        assert!(verdict.accepted);
        assert_eq!(verdict.reason, "thanks");
    }
}
