//! `AgentRngs`: per-agent RNG table, kept apart from the roster.
//!
//! The roster lives inside the market and shrinks as agents die; the RNG table
//! is owned by the turn engine and indexed by the never-reused `AgentId`, so a
//! death never shifts another agent's random stream.

use em_core::{AgentId, AgentRng};

pub struct AgentRngs {
    inner:       Vec<AgentRng>,
    global_seed: u64,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner, global_seed }
    }

    /// Mutable reference to one agent's RNG.
    ///
    /// Agents placed after the table was built get their stream on first
    /// use, seeded exactly as [`new`][Self::new] would have seeded it.
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        let index = agent.index();
        while self.inner.len() <= index {
            let next = AgentId(self.inner.len() as u32);
            self.inner.push(AgentRng::new(self.global_seed, next));
        }
        &mut self.inner[index]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
