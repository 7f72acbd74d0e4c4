//! Energy bookkeeping types: the trade log and system-wide energy totals.

use std::fmt;

use em_core::{AgentId, Energy, Step};

/// One executed trade.  Appended to the market's history, never modified.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeEntry {
    pub step:   Step,
    pub from:   String,
    pub to:     String,
    pub amount: Energy,
}

/// Energy held by living agents and by the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemEnergy {
    pub agents: Energy,
    pub food:   Energy,
    pub total:  Energy,
}

impl SystemEnergy {
    pub fn new(agents: Energy, food: Energy) -> Self {
        Self { agents, food, total: agents + food }
    }
}

impl fmt::Display for SystemEnergy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agents {} + food {} = {}", self.agents, self.food, self.total)
    }
}

/// Aggregate result of decaying every agent once.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DecaySweep {
    /// Agents alive when decay began.
    pub alive_before: usize,
    /// Sum of `energy_loss_per_turn` over those agents.
    pub decay_loss:   Energy,
    /// Part of `decay_loss` that was never there to lose: for each agent that
    /// died, how far below zero its energy went.
    pub shortfall:    Energy,
    /// Agents that died on this decay, in roster order.
    pub died:         Vec<AgentId>,
}
