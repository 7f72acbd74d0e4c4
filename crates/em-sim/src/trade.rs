//! The trade protocol.
//!
//! ```text
//! offer(proposer, target_name, amount):
//!   ① target on the roster           else TargetNotFound
//!   ② target alive                   else TargetDead
//!   ③ target in nearby_agents(radius) else Unreachable
//!   ④ proposer.check_spend(amount)   else InsufficientEnergy
//!   ⑤ target's oracle evaluates       → Executed (transfer + history) | Declined
//! ```
//!
//! Checks short-circuit on the first failure and nothing changes unless ⑤
//! accepts.  The resulting [`TradeRecord`] is stored on both parties.

use em_agent::{AgentRngs, TradeRecord, TradeStatus};
use em_behavior::{DecisionOracle, TradeVerdict};
use em_core::{AgentId, Energy, Step};
use em_market::Market;
use tracing::{debug, warn};

use crate::SimResult;
use crate::context::trade_context;

/// Run one offer of `amount` energy from `proposer` to the agent named
/// `target_name`.
///
/// An agent naming itself is treated as out of reach: it is never part of
/// its own neighbourhood.
#[allow(clippy::too_many_arguments)]
pub fn offer_trade<O: DecisionOracle>(
    market:      &mut Market,
    oracle:      &mut O,
    rngs:        &mut AgentRngs,
    step:        Step,
    proposer:    AgentId,
    target_name: &str,
    amount:      Energy,
    radius:      u32,
) -> SimResult<TradeRecord> {
    let from = market.agent(proposer)?;
    let from_name = from.name().to_string();
    let from_pos = from.position();
    let mut record = TradeRecord {
        step,
        from: from_name.clone(),
        to: target_name.to_string(),
        amount,
        status: TradeStatus::TargetNotFound,
    };

    let target = market
        .find_by_name(target_name)
        .map(|t| (t.id(), t.is_alive(), t.position().chebyshev(from_pos)));
    let Some((target_id, target_alive, distance)) = target else {
        debug!(from = %from_name, to = target_name, "trade target not found");
        market.agent_mut(proposer)?.latest_trade = Some(record.clone());
        return Ok(record);
    };

    record.status = if !target_alive {
        TradeStatus::TargetDead
    } else if !market.nearby_agents(proposer, radius)?.contains(&target_id) {
        TradeStatus::Unreachable { distance, radius }
    } else if let Err(cause) = market.agent(proposer)?.check_spend(amount) {
        TradeStatus::InsufficientEnergy { cause }
    } else {
        let ctx = trade_context(market, step, proposer, target_id, amount)?;
        let verdict = oracle
            .evaluate_trade(&ctx, rngs.get_mut(target_id))
            .unwrap_or_else(|e| {
                warn!(agent = target_name, error = %e, "unusable trade verdict; rejecting");
                TradeVerdict::reject(e.to_string())
            });
        if verdict.accepted {
            market.transfer(proposer, target_id, amount)?;
            market.record_trade(step, &from_name, target_name, amount);
            TradeStatus::Executed { reason: verdict.reason }
        } else {
            TradeStatus::Declined { reason: verdict.reason }
        }
    };

    debug!(
        from = %from_name,
        to = target_name,
        amount,
        outcome = record.status.label(),
        "trade offer"
    );
    market.agent_mut(proposer)?.latest_trade = Some(record.clone());
    market.agent_mut(target_id)?.latest_trade = Some(record.clone());
    Ok(record)
}
