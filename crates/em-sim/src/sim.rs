//! The `Sim` struct and its step loop.

use em_agent::{ActionKind, ActionRecord, AgentRngs};
use em_behavior::{Decision, DecisionOracle};
use em_core::{AgentId, MarketConfig, SimRng, Step};
use em_market::{Market, MarketSnapshot};
use tracing::{debug, info, warn};

use crate::context::decision_context;
use crate::trade::offer_trade;
use crate::{SimObserver, SimResult, StepReport, Summary};

// ── Per-step counters ─────────────────────────────────────────────────────────

#[derive(Default)]
struct ActTally {
    actions:         usize,
    trades_offered:  usize,
    trades_executed: usize,
    fallbacks:       usize,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The turn engine.
///
/// `Sim<O>` owns the market and drives the five-phase step:
///
/// 1. **Decay**: every living agent loses its `energy_loss_per_turn`.
/// 2. **Death sweep**: agents at or below zero energy leave the roster.
/// 3. **Act**: each survivor, in roster order, observes its surroundings,
///    asks the oracle for a [`Decision`], and has it applied.  Unusable
///    oracle output is replaced by `config.fallback` and recorded as such.
/// 4. **Replenish**: on steps divisible by `config.replenish_interval`, food
///    worth [`MarketConfig::replenish_target`] is scattered over the grid.
/// 5. **Report**: a [`StepReport`] is logged and handed to the observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<O: DecisionOracle> {
    /// Global configuration.
    pub config: MarketConfig,

    /// Grid, roster, and trade history.  All state changes go through it.
    pub market: Market,

    /// Decides for every agent and evaluates trade offers.
    pub oracle: O,

    /// Per-agent RNGs handed to the oracle, indexed by `AgentId`.
    pub rngs: AgentRngs,

    /// Grid seeding and replenishment.
    pub rng: SimRng,

    /// The next step to run.
    step:      Step,
    deaths:    usize,
    fallbacks: usize,
}

impl<O: DecisionOracle> Sim<O> {
    pub(crate) fn from_parts(
        config: MarketConfig,
        market: Market,
        oracle: O,
        rngs:   AgentRngs,
        rng:    SimRng,
        step:   Step,
    ) -> Self {
        Self { config, market, oracle, rngs, rng, step, deaths: 0, fallbacks: 0 }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// The next step to run; equals the number of steps run so far.
    #[inline]
    pub fn current_step(&self) -> Step {
        self.step
    }

    /// `true` once the step budget is spent or no agent is left alive.
    pub fn is_finished(&self) -> bool {
        self.step.0 >= self.config.max_steps || self.market.living_count() == 0
    }

    /// Advance exactly one step.
    ///
    /// Returns whether the simulation should continue.  Calling `step` on a
    /// finished simulation does nothing and returns `false`.
    pub fn step<S: SimObserver>(&mut self, observer: &mut S) -> SimResult<bool> {
        if self.is_finished() {
            return Ok(false);
        }
        let now = self.step;
        observer.on_step_start(now);
        let energy_before = self.market.system_energy();

        // ── Decay ─────────────────────────────────────────────────────────
        let sweep = self.market.decay_all();

        // ── Death sweep ───────────────────────────────────────────────────
        for &id in &sweep.died {
            let agent = self.market.agent(id)?;
            debug!(step = %now, agent = agent.name(), energy = agent.energy(), "agent died");
            observer.on_death(now, agent);
        }
        let deaths = self.market.remove_dead();
        self.deaths += deaths;

        // ── Act ───────────────────────────────────────────────────────────
        let mut tally = ActTally::default();
        for id in self.market.roster() {
            self.act(id, now, observer, &mut tally)?;
        }
        self.fallbacks += tally.fallbacks;

        // ── Periodic replenish ────────────────────────────────────────────
        let replenished = if now.is_every(self.config.replenish_interval) {
            let target = self.config.replenish_target();
            let out = self.market.replenish(target, &self.config, &mut self.rng);
            debug!(
                step = %now,
                added = out.energy_added,
                red = out.red_units,
                green = out.green_units,
                rejected = out.rejected,
                "market replenished"
            );
            out.energy_added
        } else {
            0
        };

        // ── Status report ─────────────────────────────────────────────────
        let report = StepReport {
            step:              now,
            alive_at_decay:    sweep.alive_before,
            decay_loss:        sweep.decay_loss,
            expired_shortfall: sweep.shortfall,
            deaths,
            actions:           tally.actions,
            trades_offered:    tally.trades_offered,
            trades_executed:   tally.trades_executed,
            fallbacks:         tally.fallbacks,
            replenished,
            energy_before,
            energy_after:      self.market.system_energy(),
        };
        info!(
            step = %now,
            alive = self.market.living_count(),
            deaths,
            trades = report.trades_executed,
            replenished,
            energy = report.energy_after.total,
            "step complete"
        );
        if !report.is_conserved() {
            warn!(step = %now, ?report, "energy balance mismatch");
        }
        observer.on_step_end(&report, &self.market);

        self.step = now.next();
        Ok(!self.is_finished())
    }

    /// Run until the step budget is spent or every agent has died.
    pub fn run<S: SimObserver>(&mut self, observer: &mut S) -> SimResult<Summary> {
        info!(
            from = %self.step,
            max_steps = self.config.max_steps,
            agents = self.market.len(),
            "simulation started"
        );
        while self.step(observer)? {}
        let summary = self.summary();
        info!(
            steps = summary.steps_run,
            survivors = summary.survivors,
            trades = summary.trades_total,
            "simulation ended"
        );
        observer.on_sim_end(&summary);
        Ok(summary)
    }

    /// Run at most `n` more steps.  Returns whether the simulation should
    /// continue afterwards.
    pub fn run_steps<S: SimObserver>(&mut self, n: u64, observer: &mut S) -> SimResult<bool> {
        for _ in 0..n {
            if !self.step(observer)? {
                break;
            }
        }
        Ok(!self.is_finished())
    }

    /// Statistics for the run so far.
    pub fn summary(&self) -> Summary {
        Summary::collect(&self.market, self.step.0, self.deaths, self.fallbacks)
    }

    /// Read-only frame for renderers.
    pub fn snapshot(&self) -> MarketSnapshot {
        self.market.snapshot(self.step)
    }

    // ── Act phase ─────────────────────────────────────────────────────────

    fn act<S: SimObserver>(
        &mut self,
        id:       AgentId,
        now:      Step,
        observer: &mut S,
        tally:    &mut ActTally,
    ) -> SimResult<()> {
        if !self.market.agent(id)?.is_alive() {
            let record = ActionRecord { step: now, kind: ActionKind::Skipped, fallback: None };
            self.market.agent_mut(id)?.latest_action = Some(record);
            return Ok(());
        }

        let ctx = decision_context(&self.market, id, now, self.config.trade_radius)?;
        let (decision, fallback) = match self.oracle.decide(&ctx, self.rngs.get_mut(id)) {
            Ok(decision) => (decision, None),
            Err(e) => {
                let substitute = Decision::from(self.config.fallback);
                warn!(
                    step = %now,
                    agent = %ctx.me.name,
                    error = %e,
                    fallback = %substitute,
                    "unusable decision; applying fallback"
                );
                tally.fallbacks += 1;
                (substitute, Some(e.to_string()))
            }
        };

        let kind = match decision {
            Decision::Move { direction } => {
                let out = self.market.move_agent(id, direction)?;
                ActionKind::Move { direction, from: out.from, to: out.to }
            }
            Decision::Gather => ActionKind::Gather { gained: self.market.gather(id)? },
            Decision::Wait => ActionKind::Wait,
            Decision::TradeOffer { amount, target } => {
                let trade = offer_trade(
                    &mut self.market,
                    &mut self.oracle,
                    &mut self.rngs,
                    now,
                    id,
                    &target,
                    amount,
                    self.config.trade_radius,
                )?;
                tally.trades_offered += 1;
                if trade.status.is_executed() {
                    tally.trades_executed += 1;
                }
                observer.on_trade(&trade);
                ActionKind::TradeOffer { to: target, amount, status: trade.status }
            }
        };
        tally.actions += 1;

        let record = ActionRecord { step: now, kind, fallback };
        debug!(step = %now, agent = %ctx.me.name, action = %record.kind, "action");
        self.market.agent_mut(id)?.latest_action = Some(record.clone());
        observer.on_action(self.market.agent(id)?, &record);
        Ok(())
    }
}
