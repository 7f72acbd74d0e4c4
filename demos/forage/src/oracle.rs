//! `MockMind`: a scripted stand-in for a language model.
//!
//! It writes the same tagged text a model would and feeds it through the
//! real parsers, so malformed replies exercise the engine's fallback path.

use em_behavior::{
    Decision, DecisionContext, DecisionOracle, OracleResult, TradeContext, TradeVerdict,
    parse_decision, parse_verdict,
};
use em_core::{AgentRng, Direction, Energy, Position};
use tracing::trace;

/// Energy above which an agent considers giving some away.
const RICH: Energy = 80;
/// Energy below which a neighbour looks like it needs help.
const POOR: Energy = 30;
/// Energy below which any offer is welcome.
const HUNGRY: Energy = 50;

pub struct MockMind {
    garble_rate: f64,
}

impl MockMind {
    pub fn new(garble_rate: f64) -> Self {
        Self { garble_rate }
    }

    fn compose_action(&self, ctx: &DecisionContext, rng: &mut AgentRng) -> String {
        if rng.gen_bool(self.garble_rate) {
            return "Hmm, let me think about that.".to_string();
        }

        // Food underfoot: usually take it.
        if ctx.current_cell().is_some() {
            let action = if rng.gen_bool(0.7) { "GATHER".to_string() } else { random_action(rng) };
            return action_block(&action);
        }

        // Rich, with a struggling neighbour: share.
        if ctx.me.energy > RICH {
            if let Some(poor) = ctx.neighbors.iter().filter(|n| n.energy < POOR).min_by_key(|n| n.energy) {
                let amount = ((ctx.me.energy - poor.energy) / 4).max(1);
                return format!(
                    "<TRADE_OFFER>\noffer: {amount} energy\nto: {}\n</TRADE_OFFER>",
                    poor.name
                );
            }
        }

        // Visible food: head for the richest cell.
        if let Some(target) = ctx.cells.iter().max_by_key(|c| c.energy) {
            if let Some(dir) = toward(ctx.me.position, target.position) {
                return action_block(&format!("MOVE {dir}"));
            }
        }

        action_block(&random_action(rng))
    }

    fn compose_verdict(&self, ctx: &TradeContext, rng: &mut AgentRng) -> String {
        if rng.gen_bool(self.garble_rate) {
            return "Sounds interesting!".to_string();
        }
        let (decision, reason) = if ctx.me.energy < HUNGRY {
            ("ACCEPT", format!("I only have {} energy left", ctx.me.energy))
        } else if ctx.me.persona.contains("Cooperative") {
            ("ACCEPT", "happy to cooperate".to_string())
        } else {
            ("REJECT", "I can manage on my own".to_string())
        };
        format!("<DECISION>\n{decision}\n</DECISION>\n<REASON>\n{reason}\n</REASON>")
    }
}

impl DecisionOracle for MockMind {
    fn decide(&mut self, ctx: &DecisionContext, rng: &mut AgentRng) -> OracleResult<Decision> {
        let reply = self.compose_action(ctx, rng);
        trace!(agent = %ctx.me.name, %reply, "mock reply");
        parse_decision(&reply)
    }

    fn evaluate_trade(&mut self, ctx: &TradeContext, rng: &mut AgentRng) -> OracleResult<TradeVerdict> {
        let reply = self.compose_verdict(ctx, rng);
        trace!(agent = %ctx.me.name, %reply, "mock verdict");
        parse_verdict(&reply)
    }
}

fn action_block(action: &str) -> String {
    format!("<ACTION>\n{action}\n</ACTION>")
}

fn random_action(rng: &mut AgentRng) -> String {
    match rng.choose(&Direction::ALL) {
        Some(dir) => format!("MOVE {dir}"),
        None => "WAIT".to_string(),
    }
}

/// First step from `from` toward `to`, larger axis first.  `None` when
/// already there.
pub(crate) fn toward(from: Position, to: Position) -> Option<Direction> {
    let dx = i64::from(to.x) - i64::from(from.x);
    let dy = i64::from(to.y) - i64::from(from.y);
    match (dx, dy) {
        (0, 0) => None,
        _ if dx.abs() >= dy.abs() => Some(if dx > 0 { Direction::Right } else { Direction::Left }),
        _ => Some(if dy > 0 { Direction::Down } else { Direction::Up }),
    }
}
