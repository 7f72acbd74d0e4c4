//! Read-only snapshot of the market for renderers.

use em_agent::{ActionRecord, TradeRecord};
use em_core::{AgentId, Energy, GridBounds, Position, Step};

/// Contents of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSnapshot {
    pub position:   Position,
    pub red_food:   u32,
    pub green_food: u32,
}

/// Public state of one agent plus its two most recent records.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub id:            AgentId,
    pub name:          String,
    pub persona:       String,
    pub position:      Position,
    pub energy:        Energy,
    pub alive:         bool,
    pub latest_action: Option<ActionRecord>,
    pub latest_trade:  Option<TradeRecord>,
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketSnapshot {
    pub step:   Step,
    pub bounds: GridBounds,
    /// Every cell, row-major.
    pub cells:  Vec<CellSnapshot>,
    /// Roster order.
    pub agents: Vec<AgentSnapshot>,
}

impl MarketSnapshot {
    pub fn cell(&self, pos: Position) -> Option<&CellSnapshot> {
        self.bounds
            .contains(pos)
            .then(|| &self.cells[self.bounds.index_of(pos)])
    }

    pub fn agents_at(&self, pos: Position) -> impl Iterator<Item = &AgentSnapshot> + '_ {
        self.agents.iter().filter(move |a| a.position == pos)
    }
}
