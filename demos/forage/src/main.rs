//! forage: four economic agents foraging and trading on a small grid.
//!
//! Each agent loses energy every step, eats the red (50) and green (5) food
//! scattered over the grid, and can give energy to agents within two cells.
//! Decisions come from a scripted mock that speaks the same tagged text
//! protocol a language model would.
//!
//! ```text
//! forage                          # defaults, 1000 steps, no files
//! forage --config forage.toml     # TOML configuration
//! forage --steps 200 --output out # CSV output into ./out
//! RUST_LOG=debug forage           # per-agent actions and trades
//! ```

mod config;
mod oracle;
mod render;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use em_agent::{Agent, TradeRecord};
use em_core::Step;
use em_market::Market;
use em_output::{CsvWriter, OutputWriter, SimOutputObserver};
use em_sim::{SimBuilder, SimObserver, StepReport, Summary};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ForageConfig;
use oracle::MockMind;
use render::render;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Sqlite,
}

#[derive(Debug, Parser)]
#[command(version, about = "Grid market simulation with scripted agents")]
struct Args {
    /// TOML configuration file.  Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the step budget.
    #[arg(long)]
    steps: Option<u64>,

    /// Draw the grid every N steps (0 = first and last frame only).
    #[arg(long)]
    render_every: Option<u64>,

    /// Write output files into this directory (created if missing).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output backend.
    #[arg(long, value_enum, default_value = "csv")]
    format: Format,
}

impl Args {
    fn apply(&self, config: &mut ForageConfig) {
        if let Some(seed) = self.seed {
            config.market.seed = seed;
        }
        if let Some(steps) = self.steps {
            config.market.max_steps = steps;
        }
        if let Some(every) = self.render_every {
            config.render_every = every;
        }
    }
}

fn open_writer(format: Format, dir: &Path) -> Result<Box<dyn OutputWriter>> {
    std::fs::create_dir_all(dir)?;
    match format {
        Format::Csv => Ok(Box::new(CsvWriter::new(dir)?)),
        #[cfg(feature = "sqlite")]
        Format::Sqlite => Ok(Box::new(em_output::SqliteWriter::new(dir)?)),
        #[cfg(not(feature = "sqlite"))]
        Format::Sqlite => anyhow::bail!("built without the `sqlite` feature"),
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Console frames plus optional file output.
struct ForageObserver {
    render_every: u64,
    output:       Option<SimOutputObserver<Box<dyn OutputWriter>>>,
}

impl SimObserver for ForageObserver {
    fn on_death(&mut self, step: Step, agent: &Agent) {
        println!("{step}: {} ({}) has died", agent.name(), agent.persona());
    }

    fn on_trade(&mut self, trade: &TradeRecord) {
        if let Some(out) = &mut self.output {
            out.on_trade(trade);
        }
    }

    fn on_step_end(&mut self, report: &StepReport, market: &Market) {
        if report.step.is_every(self.render_every) {
            print!("{}", render(&market.snapshot(report.step)));
            println!("{report}\n");
        }
        if let Some(out) = &mut self.output {
            out.on_step_end(report, market);
        }
    }

    fn on_sim_end(&mut self, summary: &Summary) {
        if let Some(out) = &mut self.output {
            out.on_sim_end(summary);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = ForageConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    let output = match &args.output {
        Some(dir) => Some(SimOutputObserver::new(open_writer(args.format, dir)?, config.snapshot_interval)),
        None => None,
    };

    let mut sim = SimBuilder::new(config.market.clone(), MockMind::new(config.garble_rate))
        .agents(config.agents.clone())
        .build()?;
    info!(agents = sim.market.len(), steps = config.market.max_steps, "forage starting");
    print!("{}", render(&sim.snapshot()));

    let mut observer = ForageObserver { render_every: config.render_every, output };
    let summary = sim.run(&mut observer)?;

    println!("\n=== Simulation ended ===");
    print!("{}", render(&sim.snapshot()));
    println!("{summary}");

    if let Some(e) = observer.output.as_mut().and_then(SimOutputObserver::take_error) {
        return Err(e.into());
    }
    if let Some(dir) = &args.output {
        info!(dir = %dir.display(), "output written");
    }
    Ok(())
}
