//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentSnapshotRow, OutputResult, StepSummaryRow, TradeRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_agent_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write one step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Write a batch of trade offers.
    fn write_trades(&mut self, rows: &[TradeRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: OutputWriter + ?Sized> OutputWriter for Box<W> {
    fn write_agent_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        (**self).write_agent_snapshots(rows)
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        (**self).write_step_summary(row)
    }

    fn write_trades(&mut self, rows: &[TradeRow]) -> OutputResult<()> {
        (**self).write_trades(rows)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}
