//! Most-recent action and trade records kept on each agent for observers.
//!
//! These are written by the turn engine and read by renderers and output
//! writers.  Engine logic never reads them back.

use std::fmt;

use em_core::{Direction, Energy, Position, Step};

use crate::AgentError;

// ── Actions ───────────────────────────────────────────────────────────────────

/// What an agent did on its turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ActionKind {
    /// The agent was dead when its turn came; the oracle was not consulted.
    Skipped,
    /// `from == to` means the move was blocked by the grid edge.
    Move { direction: Direction, from: Position, to: Position },
    Gather { gained: Energy },
    Wait,
    TradeOffer { to: String, amount: Energy, status: TradeStatus },
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Skipped => "skipped",
            ActionKind::Move { .. } => "move",
            ActionKind::Gather { .. } => "gather",
            ActionKind::Wait => "wait",
            ActionKind::TradeOffer { .. } => "trade_offer",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Skipped => f.write_str("SKIPPED"),
            ActionKind::Move { direction, from, to } if from == to => {
                write!(f, "MOVE {direction} blocked at {from}")
            }
            ActionKind::Move { direction, from, to } => write!(f, "MOVE {direction} {from} -> {to}"),
            ActionKind::Gather { gained } => write!(f, "GATHER +{gained}"),
            ActionKind::Wait => f.write_str("WAIT"),
            ActionKind::TradeOffer { to, amount, status } => {
                write!(f, "OFFER {amount} to {to}: {status}")
            }
        }
    }
}

/// An agent's action on one step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub step:     Step,
    pub kind:     ActionKind,
    /// Set when the oracle's output was malformed and `kind` is the
    /// substituted fallback; holds the parse failure.
    pub fallback: Option<String>,
}

// ── Trades ────────────────────────────────────────────────────────────────────

/// How a trade offer ended.  Each precondition failure is its own variant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum TradeStatus {
    /// The target accepted; energy changed hands.
    Executed { reason: String },
    /// The target's oracle declined.
    Declined { reason: String },
    /// No agent with that name is on the roster.
    TargetNotFound,
    /// The target is on the roster but dead.
    TargetDead,
    /// The target is alive but outside the proposer's trade radius.
    Unreachable { distance: u32, radius: u32 },
    /// The proposer's spend precondition failed.
    InsufficientEnergy { cause: AgentError },
}

impl TradeStatus {
    #[inline]
    pub fn is_executed(&self) -> bool {
        matches!(self, TradeStatus::Executed { .. })
    }

    /// Short machine-friendly label (CSV columns, log fields).
    pub fn label(&self) -> &'static str {
        match self {
            TradeStatus::Executed { .. } => "executed",
            TradeStatus::Declined { .. } => "declined",
            TradeStatus::TargetNotFound => "target_not_found",
            TradeStatus::TargetDead => "target_dead",
            TradeStatus::Unreachable { .. } => "unreachable",
            TradeStatus::InsufficientEnergy { .. } => "insufficient_energy",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Executed { reason } => write!(f, "accepted ({reason})"),
            TradeStatus::Declined { reason } => write!(f, "rejected ({reason})"),
            TradeStatus::TargetNotFound => f.write_str("target not found"),
            TradeStatus::TargetDead => f.write_str("target is dead"),
            TradeStatus::Unreachable { distance, radius } => {
                write!(f, "target {distance} cells away, radius {radius}")
            }
            TradeStatus::InsufficientEnergy { cause } => write!(f, "insufficient energy: {cause}"),
        }
    }
}

/// One trade offer as seen by either party.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeRecord {
    pub step:   Step,
    pub from:   String,
    pub to:     String,
    pub amount: Energy,
    pub status: TradeStatus,
}
