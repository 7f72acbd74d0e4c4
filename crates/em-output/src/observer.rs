//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use em_agent::TradeRecord;
use em_market::Market;
use em_sim::{SimObserver, StepReport, Summary};

use crate::row::{AgentSnapshotRow, StepSummaryRow, TradeRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes step summaries, trade offers and agent
/// snapshots to any [`OutputWriter`] backend.
///
/// Trade offers are buffered during a step and written in one batch when the
/// step ends.  Agent snapshots are written every `snapshot_interval` steps
/// (0 disables them).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:            W,
    snapshot_interval: u64,
    pending_trades:    Vec<TradeRow>,
    last_error:        Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W, snapshot_interval: u64) -> Self {
        Self {
            writer,
            snapshot_interval,
            pending_trades: Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_trade(&mut self, trade: &TradeRecord) {
        self.pending_trades.push(TradeRow::from(trade));
    }

    fn on_step_end(&mut self, report: &StepReport, market: &Market) {
        let result = self.writer.write_step_summary(&StepSummaryRow::from_report(report, market));
        self.store_err(result);

        if !self.pending_trades.is_empty() {
            let trades = std::mem::take(&mut self.pending_trades);
            let result = self.writer.write_trades(&trades);
            self.store_err(result);
        }

        if report.step.is_every(self.snapshot_interval) {
            let rows: Vec<AgentSnapshotRow> = market
                .agents()
                .iter()
                .map(|a| AgentSnapshotRow::from_agent(report.step, a))
                .collect();
            if !rows.is_empty() {
                let result = self.writer.write_agent_snapshots(&rows);
                self.store_err(result);
            }
        }
    }

    fn on_sim_end(&mut self, _summary: &Summary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
