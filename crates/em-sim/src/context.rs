//! Builds the oracle's view of the market.
//!
//! Only public state leaves the market: own state, food in the 3×3 window,
//! and name / persona / position / energy of living agents in trade range.

use em_agent::Agent;
use em_behavior::{CellView, DecisionContext, NeighborView, SelfView, TradeContext, TradeOffer};
use em_core::{AgentId, Step};
use em_market::{Market, MarketResult};

pub fn decision_context(
    market: &Market,
    id:     AgentId,
    step:   Step,
    radius: u32,
) -> MarketResult<DecisionContext> {
    let me = self_view(market.agent(id)?);

    let cells = market
        .nearby_cells(id)?
        .into_iter()
        .filter(|(_, cell)| !cell.is_empty())
        .map(|(position, cell)| CellView {
            position,
            red_food:   cell.red_food,
            green_food: cell.green_food,
            energy:     cell.energy(),
        })
        .collect();

    let neighbors = market
        .nearby_agents(id, radius)?
        .into_iter()
        .map(|other| market.agent(other).map(neighbor_view))
        .collect::<MarketResult<_>>()?;

    Ok(DecisionContext { step, grid: market.bounds(), me, cells, neighbors })
}

pub fn trade_context(
    market:   &Market,
    step:     Step,
    proposer: AgentId,
    target:   AgentId,
    amount:   em_core::Energy,
) -> MarketResult<TradeContext> {
    let from = market.agent(proposer)?;
    let to = market.agent(target)?;
    Ok(TradeContext {
        step,
        offer: TradeOffer { from: from.name().to_string(), to: to.name().to_string(), amount },
        me: self_view(to),
        proposer: neighbor_view(from),
    })
}

fn self_view(agent: &Agent) -> SelfView {
    SelfView {
        name:                 agent.name().to_string(),
        persona:              agent.persona().to_string(),
        position:             agent.position(),
        energy:               agent.energy(),
        energy_loss_per_turn: agent.energy_loss_per_turn(),
    }
}

fn neighbor_view(agent: &Agent) -> NeighborView {
    NeighborView {
        name:     agent.name().to_string(),
        persona:  agent.persona().to_string(),
        position: agent.position(),
        energy:   agent.energy(),
    }
}
