//! Decisions: the actions an agent can request on its turn.

use std::fmt;

use em_core::{Direction, Energy, FallbackDecision};
use serde::{Deserialize, Serialize};

/// What an agent wants to do this turn.
///
/// Produced by [`DecisionOracle::decide`][crate::DecisionOracle::decide] and
/// dispatched by the turn engine.  The core never sees raw oracle text, only
/// this already-parsed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decision {
    /// Step one cell; clamped at the grid edge.
    Move { direction: Direction },

    /// Take all food on the current cell.
    Gather,

    /// Do nothing.
    Wait,

    /// Offer `amount` energy to the agent named `target`.
    TradeOffer { amount: Energy, target: String },
}

impl Decision {
    #[inline]
    pub fn move_to(direction: Direction) -> Self {
        Decision::Move { direction }
    }

    pub fn trade(amount: Energy, target: impl Into<String>) -> Self {
        Decision::TradeOffer { amount, target: target.into() }
    }
}

impl From<FallbackDecision> for Decision {
    fn from(fallback: FallbackDecision) -> Self {
        match fallback {
            FallbackDecision::Wait => Decision::Wait,
            FallbackDecision::Move(dir) => Decision::Move { direction: dir },
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Move { direction } => write!(f, "MOVE {direction}"),
            Decision::Gather => f.write_str("GATHER"),
            Decision::Wait => f.write_str("WAIT"),
            Decision::TradeOffer { amount, target } => write!(f, "TRADE_OFFER {amount} to {target}"),
        }
    }
}

/// A trade offer as presented to the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    pub from:   String,
    pub to:     String,
    pub amount: Energy,
}

/// The target's answer to a [`TradeOffer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeVerdict {
    pub accepted: bool,
    pub reason:   String,
}

impl TradeVerdict {
    pub fn accept(reason: impl Into<String>) -> Self {
        Self { accepted: true, reason: reason.into() }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self { accepted: false, reason: reason.into() }
    }
}
