//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `agent_snapshots`, `step_summaries` and `trades`.

use std::path::Path;

use rusqlite::{Connection, params};

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, StepSummaryRow, TradeRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and recreate the schema.
    ///
    /// Tables from a previous run are dropped, as the CSV backend truncates
    /// its files.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS agent_snapshots;
             DROP TABLE IF EXISTS step_summaries;
             DROP TABLE IF EXISTS trades;
             CREATE TABLE agent_snapshots (
                 step     INTEGER NOT NULL,
                 agent_id INTEGER NOT NULL,
                 name     TEXT    NOT NULL,
                 x        INTEGER NOT NULL,
                 y        INTEGER NOT NULL,
                 energy   INTEGER NOT NULL,
                 alive    INTEGER NOT NULL,
                 action   TEXT    NOT NULL
             );
             CREATE TABLE step_summaries (
                 step            INTEGER PRIMARY KEY,
                 alive           INTEGER NOT NULL,
                 deaths          INTEGER NOT NULL,
                 actions         INTEGER NOT NULL,
                 trades_offered  INTEGER NOT NULL,
                 trades_executed INTEGER NOT NULL,
                 fallbacks       INTEGER NOT NULL,
                 decay_loss      INTEGER NOT NULL,
                 replenished     INTEGER NOT NULL,
                 agent_energy    INTEGER NOT NULL,
                 food_energy     INTEGER NOT NULL,
                 total_energy    INTEGER NOT NULL
             );
             CREATE TABLE trades (
                 step   INTEGER NOT NULL,
                 from_agent TEXT NOT NULL,
                 to_agent   TEXT NOT NULL,
                 amount INTEGER NOT NULL,
                 status TEXT    NOT NULL,
                 detail TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_agent_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots \
                 (step, agent_id, name, x, y, energy, alive, action) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.step as i64,
                    row.agent_id,
                    row.name,
                    row.x,
                    row.y,
                    row.energy,
                    row.alive as i64,
                    row.action,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO step_summaries \
             (step, alive, deaths, actions, trades_offered, trades_executed, fallbacks, \
              decay_loss, replenished, agent_energy, food_energy, total_energy) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                row.step as i64,
                row.alive as i64,
                row.deaths as i64,
                row.actions as i64,
                row.trades_offered as i64,
                row.trades_executed as i64,
                row.fallbacks as i64,
                row.decay_loss,
                row.replenished,
                row.agent_energy,
                row.food_energy,
                row.total_energy,
            ],
        )?;
        Ok(())
    }

    fn write_trades(&mut self, rows: &[TradeRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO trades (step, from_agent, to_agent, amount, status, detail) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.step as i64,
                    row.from,
                    row.to,
                    row.amount,
                    row.status,
                    row.detail,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
