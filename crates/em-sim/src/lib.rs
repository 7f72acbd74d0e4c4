//! `em-sim`: the turn engine of the rust_em grid market simulation.
//!
//! # Step loop
//!
//! ```text
//! while step < config.max_steps and someone is alive:
//!   ① Decay        every living agent loses energy_loss_per_turn
//!   ② Death sweep  agents at or below 0 energy leave the roster
//!   ③ Act          for each agent in roster order:
//!                    observe → DecisionOracle::decide (fallback on error)
//!                    Move        → Market::move_agent
//!                    Gather      → Market::gather
//!                    Wait        → nothing
//!                    TradeOffer  → trade protocol (see [`trade`])
//!   ④ Replenish    when step % replenish_interval == 0
//!   ⑤ Report       StepReport to tracing and the observer
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use em_behavior::WaitOracle;
//! use em_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, WaitOracle).agents(seeds).build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! println!("{summary}");
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;
pub mod trade;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{StepReport, Summary};
pub use sim::Sim;
