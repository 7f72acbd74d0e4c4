//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `step_summaries.csv`
//! - `trades.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, StepSummaryRow, TradeRow};

pub const AGENT_SNAPSHOT_HEADER: [&str; 8] =
    ["step", "agent_id", "name", "x", "y", "energy", "alive", "action"];

pub const STEP_SUMMARY_HEADER: [&str; 12] = [
    "step",
    "alive",
    "deaths",
    "actions",
    "trades_offered",
    "trades_executed",
    "fallbacks",
    "decay_loss",
    "replenished",
    "agent_energy",
    "food_energy",
    "total_energy",
];

pub const TRADE_HEADER: [&str; 6] = ["step", "from", "to", "amount", "status", "detail"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    trades:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(AGENT_SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record(STEP_SUMMARY_HEADER)?;

        let mut trades = Writer::from_path(dir.join("trades.csv"))?;
        trades.write_record(TRADE_HEADER)?;

        Ok(Self { snapshots, summaries, trades, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_agent_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.step.to_string(),
                row.agent_id.to_string(),
                row.name.clone(),
                row.x.to_string(),
                row.y.to_string(),
                row.energy.to_string(),
                (row.alive as u8).to_string(),
                row.action.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.alive.to_string(),
            row.deaths.to_string(),
            row.actions.to_string(),
            row.trades_offered.to_string(),
            row.trades_executed.to_string(),
            row.fallbacks.to_string(),
            row.decay_loss.to_string(),
            row.replenished.to_string(),
            row.agent_energy.to_string(),
            row.food_energy.to_string(),
            row.total_energy.to_string(),
        ])?;
        Ok(())
    }

    fn write_trades(&mut self, rows: &[TradeRow]) -> OutputResult<()> {
        for row in rows {
            self.trades.write_record(&[
                row.step.to_string(),
                row.from.clone(),
                row.to.clone(),
                row.amount.to_string(),
                row.status.to_string(),
                row.detail.clone(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.trades.flush()?;
        Ok(())
    }
}
