//! The `Agent` record and its energy lifecycle.

use em_core::{AgentId, Energy, Position};

use crate::{ActionRecord, AgentError, AgentResult, TradeRecord};

// ── AgentSeed ─────────────────────────────────────────────────────────────────

/// Everything needed to create one agent at simulation start.
///
/// Unset fields fall back to the run's configuration: `position = None` means
/// "a random free cell", and energy / loss default to the configured values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSeed {
    pub name:                 String,
    pub persona:              String,
    pub position:             Option<Position>,
    pub energy:               Option<Energy>,
    pub energy_loss_per_turn: Option<Energy>,
}

impl AgentSeed {
    pub fn new(name: impl Into<String>, persona: impl Into<String>) -> Self {
        Self {
            name:                 name.into(),
            persona:              persona.into(),
            position:             None,
            energy:               None,
            energy_loss_per_turn: None,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_energy(mut self, energy: Energy) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn with_loss(mut self, energy_loss_per_turn: Energy) -> Self {
        self.energy_loss_per_turn = Some(energy_loss_per_turn);
        self
    }
}

// ── DecayOutcome ──────────────────────────────────────────────────────────────

/// Result of one [`Agent::decay`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct DecayOutcome {
    /// Energy subtracted (the agent's full per-turn loss, or 0 if it was
    /// already dead).
    pub lost: Energy,
    /// `true` if this decay killed the agent.
    pub died: bool,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One economic agent.
///
/// Life is monotonic: `is_alive` goes from `true` to `false` exactly once, on
/// the decay that leaves energy at or below zero, and nothing afterwards can
/// change the agent's energy.
#[derive(Clone, Debug)]
pub struct Agent {
    id:                   AgentId,
    name:                 String,
    persona:              String,
    position:             Position,
    energy:               Energy,
    alive:                bool,
    energy_loss_per_turn: Energy,

    /// Most recent action; observation only.
    pub latest_action: Option<ActionRecord>,
    /// Most recent trade this agent took part in, either side; observation only.
    pub latest_trade:  Option<TradeRecord>,
}

impl Agent {
    pub fn new(
        id:                   AgentId,
        name:                 impl Into<String>,
        persona:              impl Into<String>,
        position:             Position,
        energy:               Energy,
        energy_loss_per_turn: Energy,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            persona: persona.into(),
            position,
            energy,
            alive: energy > 0,
            energy_loss_per_turn,
            latest_action: None,
            latest_trade: None,
        }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn persona(&self) -> &str {
        &self.persona
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn energy(&self) -> Energy {
        self.energy
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn energy_loss_per_turn(&self) -> Energy {
        self.energy_loss_per_turn
    }

    /// Relocate the agent.  Bounds are the caller's (the market's) concern;
    /// dead agents stay where they fell.
    pub fn set_position(&mut self, position: Position) {
        if self.alive {
            self.position = position;
        }
    }

    /// Apply one turn of energy loss.  No-op once dead.
    pub fn decay(&mut self) -> DecayOutcome {
        if !self.alive {
            return DecayOutcome::default();
        }
        self.energy -= self.energy_loss_per_turn;
        let died = self.energy <= 0;
        if died {
            self.alive = false;
        }
        DecayOutcome { lost: self.energy_loss_per_turn, died }
    }

    /// Add `amount` energy.  No upper bound; ignored for dead agents and
    /// non-positive amounts.
    pub fn gain(&mut self, amount: Energy) {
        if self.alive && amount > 0 {
            self.energy += amount;
        }
    }

    /// Check whether [`spend`][Self::spend] would succeed without changing
    /// anything.
    ///
    /// Fails when the agent is dead, `amount <= 0`, `amount >= energy`, or the
    /// remainder would not exceed `energy_loss_per_turn` (the agent must be
    /// able to survive its own next decay).
    pub fn check_spend(&self, amount: Energy) -> AgentResult<()> {
        if !self.alive {
            return Err(AgentError::Dead(self.id));
        }
        if amount <= 0 {
            return Err(AgentError::NonPositiveAmount(amount));
        }
        if amount >= self.energy {
            return Err(AgentError::InsufficientResource { energy: self.energy, amount });
        }
        let remaining = self.energy - amount;
        if remaining <= self.energy_loss_per_turn {
            return Err(AgentError::WouldNotSurvive {
                remaining,
                energy_loss_per_turn: self.energy_loss_per_turn,
            });
        }
        Ok(())
    }

    /// Remove `amount` energy if [`check_spend`][Self::check_spend] passes.
    pub fn spend(&mut self, amount: Energy) -> AgentResult<()> {
        self.check_spend(amount)?;
        self.energy -= amount;
        Ok(())
    }
}
