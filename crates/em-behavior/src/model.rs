//! The `DecisionOracle` trait: the main extension point for user code.

use em_core::AgentRng;

use crate::{Decision, DecisionContext, OracleResult, TradeContext, TradeVerdict};

/// Pluggable decision-making for agents.
///
/// The turn engine calls [`decide`][Self::decide] once per living agent per
/// step, and [`evaluate_trade`][Self::evaluate_trade] on the *target* of every
/// trade offer that passes its preconditions.  Both calls are synchronous;
/// timeouts and retries are the implementation's business.
///
/// Returning [`OracleError::Malformed`][crate::OracleError::Malformed] (or any
/// other error) is never fatal: the engine substitutes its configured
/// fallback decision, or treats a failed verdict as a rejection, and records
/// that it did so.
///
/// # Example
///
/// ```rust
/// use em_behavior::{Decision, DecisionContext, DecisionOracle, OracleResult};
/// use em_core::AgentRng;
///
/// struct AlwaysGather;
///
/// impl DecisionOracle for AlwaysGather {
///     fn decide(&mut self, _ctx: &DecisionContext, _rng: &mut AgentRng) -> OracleResult<Decision> {
///         Ok(Decision::Gather)
///     }
/// }
/// ```
pub trait DecisionOracle {
    /// Choose an action for the agent described by `ctx.me`.
    fn decide(&mut self, ctx: &DecisionContext, rng: &mut AgentRng) -> OracleResult<Decision>;

    /// Accept or reject the offer in `ctx.offer`, on behalf of `ctx.me`.
    ///
    /// Default: reject every offer.
    fn evaluate_trade(&mut self, _ctx: &TradeContext, _rng: &mut AgentRng) -> OracleResult<TradeVerdict> {
        Ok(TradeVerdict::reject("not trading"))
    }
}

impl<O: DecisionOracle + ?Sized> DecisionOracle for Box<O> {
    fn decide(&mut self, ctx: &DecisionContext, rng: &mut AgentRng) -> OracleResult<Decision> {
        (**self).decide(ctx, rng)
    }

    fn evaluate_trade(&mut self, ctx: &TradeContext, rng: &mut AgentRng) -> OracleResult<TradeVerdict> {
        (**self).evaluate_trade(ctx, rng)
    }
}
