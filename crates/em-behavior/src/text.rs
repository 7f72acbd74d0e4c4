//! Adapter from a free-text completion backend to a [`DecisionOracle`].
//!
//! [`TaggedTextOracle`] renders a prompt from the serialized context, hands it
//! to a [`TextBackend`], and parses the tagged reply with
//! [`parse_decision`] / [`parse_verdict`].  All text-format fragility stays in
//! this module; the turn engine only ever sees typed decisions.

use em_core::AgentRng;
use tracing::trace;

use crate::{
    parse_decision, parse_verdict, Decision, DecisionContext, DecisionOracle, OracleResult,
    TradeContext, TradeVerdict,
};

/// Anything that turns a prompt into a free-text reply: a scripted mock, a
/// language-model client, a human at a terminal.
pub trait TextBackend {
    fn complete(&mut self, prompt: &str, rng: &mut AgentRng) -> OracleResult<String>;
}

impl<F> TextBackend for F
where
    F: FnMut(&str, &mut AgentRng) -> OracleResult<String>,
{
    fn complete(&mut self, prompt: &str, rng: &mut AgentRng) -> OracleResult<String> {
        self(prompt, rng)
    }
}

/// A [`DecisionOracle`] speaking the tagged text protocol of [`crate::parse`].
pub struct TaggedTextOracle<B: TextBackend> {
    backend: B,
}

impl<B: TextBackend> TaggedTextOracle<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

impl<B: TextBackend> DecisionOracle for TaggedTextOracle<B> {
    fn decide(&mut self, ctx: &DecisionContext, rng: &mut AgentRng) -> OracleResult<Decision> {
        let prompt = decision_prompt(ctx)?;
        let reply = self.backend.complete(&prompt, rng)?;
        trace!(agent = %ctx.me.name, %reply, "oracle reply");
        parse_decision(&reply)
    }

    fn evaluate_trade(&mut self, ctx: &TradeContext, rng: &mut AgentRng) -> OracleResult<TradeVerdict> {
        let prompt = trade_prompt(ctx)?;
        let reply = self.backend.complete(&prompt, rng)?;
        trace!(agent = %ctx.me.name, %reply, "oracle verdict");
        parse_verdict(&reply)
    }
}

/// Prompt asking for an `<ACTION>` or `<TRADE_OFFER>` block.
pub fn decision_prompt(ctx: &DecisionContext) -> OracleResult<String> {
    Ok(format!(
        "You are {name}, an economic agent ({persona}) on a {grid} grid.\n\
         You lose {loss} energy every turn and die at 0. Red food is worth 50 energy, green food 5.\n\
         \n\
         Observation:\n{json}\n\
         \n\
         Respond with exactly one block:\n\
         <ACTION>\nMOVE UP | MOVE DOWN | MOVE LEFT | MOVE RIGHT | GATHER | WAIT\n</ACTION>\n\
         or, to give energy to a visible agent:\n\
         <TRADE_OFFER>\noffer: [amount] energy\nto: [agent_name]\n</TRADE_OFFER>\n",
        name = ctx.me.name,
        persona = ctx.me.persona,
        grid = ctx.grid,
        loss = ctx.me.energy_loss_per_turn,
        json = ctx.to_json()?,
    ))
}

/// Prompt asking for a `<DECISION>` and `<REASON>` block.
pub fn trade_prompt(ctx: &TradeContext) -> OracleResult<String> {
    Ok(format!(
        "You are {name}, an economic agent ({persona}) with {energy} energy.\n\
         {from} ({from_persona}) offers to give you {amount} energy.\n\
         \n\
         Details:\n{json}\n\
         \n\
         Reply with:\n\
         <DECISION>\nACCEPT or REJECT\n</DECISION>\n\
         <REASON>\nbrief explanation\n</REASON>\n",
        name = ctx.me.name,
        persona = ctx.me.persona,
        energy = ctx.me.energy,
        from = ctx.proposer.name,
        from_persona = ctx.proposer.persona,
        amount = ctx.offer.amount,
        json = ctx.to_json()?,
    ))
}
