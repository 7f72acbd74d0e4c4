//! Unit tests for em-agent.

use em_core::{AgentId, Position};

use crate::{Agent, AgentError};

fn agent(energy: i64, loss: i64) -> Agent {
    Agent::new(AgentId(0), "Agent_1", "Risk-averse", Position::new(4, 4), energy, loss)
}

// ── Decay ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod decay_tests {
    use super::*;

    #[test]
    fn decay_subtracts_loss() {
        let mut a = agent(10, 2);
        let out = a.decay();
        assert_eq!(a.energy(), 8);
        assert!(a.is_alive());
        assert_eq!(out.lost, 2);
        assert!(!out.died);
    }

    #[test]
    fn decay_to_exactly_zero_kills() {
        let mut a = agent(2, 2);
        assert!(a.decay().died);
        assert_eq!(a.energy(), 0);
        assert!(!a.is_alive());
    }

    #[test]
    fn decay_below_zero_kills() {
        let mut a = agent(1, 2);
        assert!(a.decay().died);
        assert_eq!(a.energy(), -1);
    }

    #[test]
    fn decay_is_noop_once_dead() {
        let mut a = agent(1, 2);
        a.decay();
        let out = a.decay();
        assert_eq!(out.lost, 0);
        assert!(!out.died);
        assert_eq!(a.energy(), -1);
        assert!(!a.is_alive());
    }

    #[test]
    fn created_with_no_energy_is_dead() {
        assert!(!agent(0, 2).is_alive());
    }
}

// ── Gain / spend ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod spend_tests {
    use super::*;

    #[test]
    fn gain_has_no_upper_bound() {
        let mut a = agent(10, 2);
        a.gain(1_000_000);
        assert_eq!(a.energy(), 1_000_010);
    }

    #[test]
    fn dead_agent_cannot_gain() {
        let mut a = agent(1, 2);
        a.decay();
        a.gain(50);
        assert_eq!(a.energy(), -1);
        assert!(!a.is_alive());
    }

    #[test]
    fn spend_within_budget() {
        let mut a = agent(10, 2);
        a.spend(7).unwrap();
        assert_eq!(a.energy(), 3);
    }

    #[test]
    fn spend_that_would_starve_is_refused() {
        // 5 - 4 = 1, not above the loss of 2.
        let mut a = agent(5, 2);
        assert_eq!(
            a.spend(4),
            Err(AgentError::WouldNotSurvive { remaining: 1, energy_loss_per_turn: 2 })
        );
        assert_eq!(a.energy(), 5);
    }

    #[test]
    fn remainder_equal_to_loss_is_refused() {
        let a = agent(10, 2);
        assert!(a.check_spend(8).is_err());
        assert!(a.check_spend(7).is_ok());
    }

    #[test]
    fn spend_everything_is_refused() {
        let mut a = agent(10, 0);
        assert_eq!(a.spend(10), Err(AgentError::InsufficientResource { energy: 10, amount: 10 }));
        assert_eq!(a.spend(11), Err(AgentError::InsufficientResource { energy: 10, amount: 11 }));
    }

    #[test]
    fn non_positive_amount_is_refused() {
        let mut a = agent(10, 2);
        assert_eq!(a.spend(0), Err(AgentError::NonPositiveAmount(0)));
        assert_eq!(a.spend(-3), Err(AgentError::NonPositiveAmount(-3)));
        assert_eq!(a.energy(), 10);
    }

    #[test]
    fn dead_agent_cannot_spend() {
        let mut a = agent(1, 2);
        a.decay();
        assert_eq!(a.spend(1), Err(AgentError::Dead(AgentId(0))));
    }
}

// ── Position ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod position_tests {
    use super::*;

    #[test]
    fn dead_agent_does_not_move() {
        let mut a = agent(1, 2);
        a.decay();
        a.set_position(Position::new(0, 0));
        assert_eq!(a.position(), Position::new(4, 4));
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod record_tests {
    use em_core::Direction;

    use crate::{ActionKind, TradeStatus};

    use super::*;

    #[test]
    fn blocked_move_renders_as_blocked() {
        let kind = ActionKind::Move {
            direction: Direction::Up,
            from:      Position::new(3, 0),
            to:        Position::new(3, 0),
        };
        assert_eq!(kind.to_string(), "MOVE UP blocked at (3, 0)");
    }

    #[test]
    fn trade_status_labels() {
        assert!(TradeStatus::Executed { reason: "ok".into() }.is_executed());
        assert!(!TradeStatus::TargetNotFound.is_executed());
        assert_eq!(TradeStatus::Unreachable { distance: 3, radius: 2 }.label(), "unreachable");
        let refused = TradeStatus::InsufficientEnergy {
            cause: AgentError::WouldNotSurvive { remaining: 1, energy_loss_per_turn: 2 },
        };
        assert_eq!(refused.label(), "insufficient_energy");
    }
}

// ── RNG table ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rngs_tests {
    use em_core::AgentRng;

    use crate::AgentRngs;

    use super::*;

    #[test]
    fn late_agent_gets_the_stream_it_would_have_had() {
        let mut rngs = AgentRngs::new(1, 7);
        let late: u64 = rngs.get_mut(AgentId(3)).gen_range(0..u64::MAX);
        let expected: u64 = AgentRng::new(7, AgentId(3)).gen_range(0..u64::MAX);
        assert_eq!(late, expected);
        assert_eq!(rngs.len(), 4);
    }

    #[test]
    fn growing_leaves_existing_streams_alone() {
        let mut grown = AgentRngs::new(1, 7);
        let mut fixed = AgentRngs::new(1, 7);
        grown.get_mut(AgentId(5));
        assert_eq!(
            grown.get_mut(AgentId(0)).gen_range(0..1000u32),
            fixed.get_mut(AgentId(0)).gen_range(0..1000u32)
        );
    }
}
