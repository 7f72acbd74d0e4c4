//! Simulation configuration.
//!
//! Typically loaded from a TOML file by the application crate and passed to
//! the simulation builder.  Every field has a default so partial files work
//! (with the `serde` feature, missing keys fall back to [`MarketConfig::default`]).

use crate::{Direction, EmError, EmResult, Energy, GridBounds, GREEN_FOOD_ENERGY};

// ── FallbackDecision ──────────────────────────────────────────────────────────

/// The action substituted when the oracle's output cannot be parsed into a
/// decision.  Always deterministic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "direction", rename_all = "snake_case"))]
pub enum FallbackDecision {
    /// Do nothing this turn.
    #[default]
    Wait,
    /// Step once in a fixed direction.
    Move(Direction),
}

// ── MarketConfig ──────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarketConfig {
    /// Grid width in cells.
    pub width: u32,

    /// Grid height in cells.
    pub height: u32,

    /// Master RNG seed.  The same seed (and the same oracle) always produces
    /// identical runs.
    pub seed: u64,

    /// Step budget.  Steps `0..max_steps` are simulated.
    pub max_steps: u64,

    /// Energy every agent starts with unless its seed overrides it.
    pub initial_energy: Energy,

    /// Energy every agent loses on each decay unless its seed overrides it.
    pub energy_loss_per_turn: Energy,

    /// Average energy the grid regains per turn.  Also scales the initial
    /// seeding target.
    pub total_energy_added_per_turn: Energy,

    /// Replenish every N steps (step 0 included).  0 disables replenishment.
    pub replenish_interval: u64,

    /// The initial distribution stops once the grid holds
    /// `total_energy_added_per_turn × initial_energy_turns`.
    pub initial_energy_turns: u64,

    /// Per-cell probability of receiving food during the initial distribution.
    pub food_probability: f64,

    /// Probability that a food placement is red (the rest is green).
    pub red_probability: f64,

    /// Upper bound of the random unit count placed in a seeded cell.
    pub max_food_per_cell: u32,

    /// Rejected increments tolerated by one replenishment before it gives up.
    /// At least 1.
    pub replenish_retry_budget: u32,

    /// Chebyshev radius within which agents see (and may trade with) each other.
    pub trade_radius: u32,

    /// Action substituted for malformed oracle output.
    pub fallback: FallbackDecision,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            width:                       9,
            height:                      9,
            seed:                        42,
            max_steps:                   1_000,
            initial_energy:              100,
            energy_loss_per_turn:        2,
            total_energy_added_per_turn: 10,
            replenish_interval:          20,
            initial_energy_turns:        20,
            food_probability:            0.2,
            red_probability:             0.7,
            max_food_per_cell:           2,
            replenish_retry_budget:      50,
            trade_radius:                2,
            fallback:                    FallbackDecision::Wait,
        }
    }
}

impl MarketConfig {
    #[inline]
    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.width, self.height)
    }

    /// Energy target of the initial distribution.
    #[inline]
    pub fn initial_grid_energy(&self) -> Energy {
        self.total_energy_added_per_turn * self.initial_energy_turns as Energy
    }

    /// Energy target of one periodic replenishment: the per-turn rate times
    /// the number of turns since the previous one.
    #[inline]
    pub fn replenish_target(&self) -> Energy {
        self.total_energy_added_per_turn * self.replenish_interval.max(1) as Energy
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> EmResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EmError::Config(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.energy_loss_per_turn < 0 {
            return Err(EmError::Config("energy_loss_per_turn must not be negative".into()));
        }
        if self.initial_energy <= 0 {
            return Err(EmError::Config("initial_energy must be positive".into()));
        }
        if self.total_energy_added_per_turn < 0 {
            return Err(EmError::Config("total_energy_added_per_turn must not be negative".into()));
        }
        for (name, p) in [("food_probability", self.food_probability), ("red_probability", self.red_probability)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(EmError::Config(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        if self.max_food_per_cell == 0 {
            return Err(EmError::Config("max_food_per_cell must be at least 1".into()));
        }
        if self.replenish_retry_budget == 0 {
            return Err(EmError::Config("replenish_retry_budget must be at least 1".into()));
        }
        if self.replenish_interval > 0 && self.replenish_target() > 0 && self.replenish_target() < GREEN_FOOD_ENERGY {
            return Err(EmError::Config(format!(
                "replenish target {} is below the smallest food increment {GREEN_FOOD_ENERGY}",
                self.replenish_target()
            )));
        }
        Ok(())
    }
}
