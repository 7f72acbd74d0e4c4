//! Plain data row types written by output backends.

use em_agent::{Agent, TradeRecord, TradeStatus};
use em_core::Step;
use em_market::Market;
use em_sim::StepReport;

/// One agent's state at the end of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSnapshotRow {
    pub step:     u64,
    pub agent_id: u32,
    pub name:     String,
    pub x:        u32,
    pub y:        u32,
    pub energy:   i64,
    pub alive:    bool,
    /// Display form of the agent's latest action; empty if it has none.
    pub action:   String,
}

impl AgentSnapshotRow {
    pub fn from_agent(step: Step, agent: &Agent) -> Self {
        let pos = agent.position();
        Self {
            step:     step.0,
            agent_id: agent.id().0,
            name:     agent.name().to_string(),
            x:        pos.x,
            y:        pos.y,
            energy:   agent.energy(),
            alive:    agent.is_alive(),
            action:   agent
                .latest_action
                .as_ref()
                .map(|a| a.kind.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Summary statistics for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSummaryRow {
    pub step:            u64,
    pub alive:           u64,
    pub deaths:          u64,
    pub actions:         u64,
    pub trades_offered:  u64,
    pub trades_executed: u64,
    pub fallbacks:       u64,
    pub decay_loss:      i64,
    pub replenished:     i64,
    pub agent_energy:    i64,
    pub food_energy:     i64,
    pub total_energy:    i64,
}

impl StepSummaryRow {
    pub fn from_report(report: &StepReport, market: &Market) -> Self {
        Self {
            step:            report.step.0,
            alive:           market.living_count() as u64,
            deaths:          report.deaths as u64,
            actions:         report.actions as u64,
            trades_offered:  report.trades_offered as u64,
            trades_executed: report.trades_executed as u64,
            fallbacks:       report.fallbacks as u64,
            decay_loss:      report.decay_loss,
            replenished:     report.replenished,
            agent_energy:    report.energy_after.agents,
            food_energy:     report.energy_after.food,
            total_energy:    report.energy_after.total,
        }
    }
}

/// One trade offer and how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRow {
    pub step:   u64,
    pub from:   String,
    pub to:     String,
    pub amount: i64,
    /// [`TradeStatus::label`].
    pub status: &'static str,
    /// The target's reason for executed / declined offers, otherwise the
    /// failed precondition.
    pub detail: String,
}

impl From<&TradeRecord> for TradeRow {
    fn from(record: &TradeRecord) -> Self {
        let detail = match &record.status {
            TradeStatus::Executed { reason } | TradeStatus::Declined { reason } => reason.clone(),
            other => other.to_string(),
        };
        Self {
            step:   record.step.0,
            from:   record.from.clone(),
            to:     record.to.clone(),
            amount: record.amount,
            status: record.status.label(),
            detail,
        }
    }
}
