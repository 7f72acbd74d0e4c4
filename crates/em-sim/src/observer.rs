//! Simulation observer trait for status reporting and data collection.

use em_agent::{ActionRecord, Agent, TradeRecord};
use em_core::Step;
use em_market::Market;

use crate::{StepReport, Summary};

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] and
/// [`Sim::run`][crate::Sim::run] at fixed points of each step.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Observers get shared references only; they
/// can never steer the simulation.
///
/// # Example: death counter
///
/// ```rust
/// use em_agent::Agent;
/// use em_core::Step;
/// use em_sim::SimObserver;
///
/// #[derive(Default)]
/// struct Obituaries(Vec<String>);
///
/// impl SimObserver for Obituaries {
///     fn on_death(&mut self, step: Step, agent: &Agent) {
///         self.0.push(format!("{step}: {}", agent.name()));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before decay.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called for every agent that died on this step's decay, before it is
    /// swept from the roster.
    fn on_death(&mut self, _step: Step, _agent: &Agent) {}

    /// Called after each agent's action has been applied.  `agent` reflects
    /// the post-action state.
    fn on_action(&mut self, _agent: &Agent, _action: &ActionRecord) {}

    /// Called for every trade offer, whatever its outcome.
    fn on_trade(&mut self, _trade: &TradeRecord) {}

    /// Called once the step is complete, with the market as of the end of
    /// the step.
    fn on_step_end(&mut self, _report: &StepReport, _market: &Market) {}

    /// Called once by [`Sim::run`][crate::Sim::run] after the final step.
    fn on_sim_end(&mut self, _summary: &Summary) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
