//! `em-output`: simulation output writers for the rust_em simulation.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                                 |
//! |-----------|---------|---------------------------------------------------------------|
//! | *(none)*  | CSV     | `agent_snapshots.csv`, `step_summaries.csv`, `trades.csv`     |
//! | `sqlite`  | SQLite  | `output.db`                                                   |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `em_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use em_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, 10);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, StepSummaryRow, TradeRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
