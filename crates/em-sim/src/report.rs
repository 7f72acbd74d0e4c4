//! Per-step status reports and the end-of-run summary.

use std::collections::BTreeMap;
use std::fmt;

use em_core::{Energy, Step};
use em_market::{Market, SystemEnergy};

// ── StepReport ────────────────────────────────────────────────────────────────

/// What happened during one step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepReport {
    pub step:              Step,
    /// Living agents when decay began.
    pub alive_at_decay:    usize,
    /// `energy_loss_per_turn` summed over those agents.
    pub decay_loss:        Energy,
    /// Nominal loss that dying agents did not actually have (see
    /// [`is_conserved`][Self::is_conserved]).
    pub expired_shortfall: Energy,
    pub deaths:            usize,
    /// Agents that acted (oracle consulted or fallback applied).
    pub actions:           usize,
    pub trades_offered:    usize,
    pub trades_executed:   usize,
    /// Actions that replaced an unusable oracle decision.
    pub fallbacks:         usize,
    /// Food energy added by periodic replenishment; 0 on other steps.
    pub replenished:       Energy,
    pub energy_before:     SystemEnergy,
    pub energy_after:      SystemEnergy,
}

impl StepReport {
    /// Energy balance for the step:
    /// `after == before − decay_loss + expired_shortfall + replenished`.
    ///
    /// Gathering and trading only move energy around, so any other result
    /// means energy was created or destroyed.
    pub fn is_conserved(&self) -> bool {
        self.energy_after.total
            == self.energy_before.total - self.decay_loss + self.expired_shortfall + self.replenished
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} acted, {} died, trades {}/{}, replenished {}, energy {}",
            self.step,
            self.actions,
            self.deaths,
            self.trades_executed,
            self.trades_offered,
            self.replenished,
            self.energy_after,
        )
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// Aggregate statistics for a run so far.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub steps_run:           u64,
    pub survivors:           usize,
    /// Mean energy of survivors; 0 when nobody survived.
    pub average_energy:      f64,
    pub trades_total:        usize,
    /// Executed trades keyed by the proposing agent's name.
    pub trades_by_initiator: BTreeMap<String, usize>,
    pub system_energy:       SystemEnergy,
    pub deaths:              usize,
    pub fallbacks:           usize,
}

impl Summary {
    pub(crate) fn collect(market: &Market, steps_run: u64, deaths: usize, fallbacks: usize) -> Self {
        let living: Vec<Energy> = market
            .agents()
            .iter()
            .filter(|a| a.is_alive())
            .map(|a| a.energy())
            .collect();
        let average_energy = if living.is_empty() {
            0.0
        } else {
            living.iter().sum::<Energy>() as f64 / living.len() as f64
        };

        let mut trades_by_initiator = BTreeMap::new();
        for trade in market.trade_history() {
            *trades_by_initiator.entry(trade.from.clone()).or_insert(0) += 1;
        }

        Self {
            steps_run,
            survivors: living.len(),
            average_energy,
            trades_total: market.trade_history().len(),
            trades_by_initiator,
            system_energy: market.system_energy(),
            deaths,
            fallbacks,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "steps run:      {}", self.steps_run)?;
        writeln!(f, "survivors:      {}", self.survivors)?;
        writeln!(f, "average energy: {:.1}", self.average_energy)?;
        writeln!(f, "deaths:         {}", self.deaths)?;
        writeln!(f, "fallbacks:      {}", self.fallbacks)?;
        writeln!(f, "system energy:  {}", self.system_energy)?;
        write!(f, "trades:         {}", self.trades_total)?;
        for (name, count) in &self.trades_by_initiator {
            write!(f, "\n  {name} initiated {count}")?;
        }
        Ok(())
    }
}
