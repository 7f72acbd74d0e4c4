//! Observable contexts handed to the oracle.
//!
//! Contexts are plain, owned, serializable data: the oracle never gets a
//! reference into the market.  Other agents appear only through their public
//! state (name, persona, position, energy); their trade history is never
//! exposed.

use em_core::{Energy, GridBounds, Position, Step};
use serde::{Deserialize, Serialize};

use crate::{OracleResult, TradeOffer};

/// The deciding agent's own state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfView {
    pub name:                 String,
    pub persona:              String,
    pub position:             Position,
    pub energy:               Energy,
    pub energy_loss_per_turn: Energy,
}

/// A visible cell that holds food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub position:   Position,
    pub red_food:   u32,
    pub green_food: u32,
    pub energy:     Energy,
}

/// Public state of another living agent in sight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborView {
    pub name:     String,
    pub persona:  String,
    pub position: Position,
    pub energy:   Energy,
}

/// Everything one agent can observe on its turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionContext {
    pub step:      Step,
    pub grid:      GridBounds,
    pub me:        SelfView,
    /// Cells of the 3×3 window around `me` that hold food, row-major.
    pub cells:     Vec<CellView>,
    /// Living agents within the trade radius, in roster order.
    pub neighbors: Vec<NeighborView>,
}

impl DecisionContext {
    /// The visible cell under the agent, if it holds food.
    pub fn current_cell(&self) -> Option<&CellView> {
        self.cells.iter().find(|c| c.position == self.me.position)
    }

    pub fn neighbor(&self, name: &str) -> Option<&NeighborView> {
        self.neighbors.iter().find(|n| n.name == name)
    }

    /// Serialized form consumed by text-backed oracles.
    pub fn to_json(&self) -> OracleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// What a trade target sees when asked to evaluate an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeContext {
    pub step:     Step,
    pub offer:    TradeOffer,
    /// The target itself.
    pub me:       SelfView,
    /// The agent making the offer.
    pub proposer: NeighborView,
}

impl TradeContext {
    pub fn to_json(&self) -> OracleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
