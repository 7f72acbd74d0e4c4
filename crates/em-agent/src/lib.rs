//! `em-agent`: per-agent state for the rust_em grid market simulation.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`agent`]  | `Agent` (energy lifecycle, spend checks), `AgentSeed`          |
//! | [`record`] | `ActionRecord`, `TradeRecord`, `TradeStatus` for observers     |
//! | [`rngs`]   | `AgentRngs`: per-agent RNG table indexed by `AgentId`         |
//! | [`error`]  | `AgentError`, `AgentResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on seeds and records.    |

pub mod agent;
pub mod error;
pub mod record;
pub mod rngs;

#[cfg(test)]
mod tests;

pub use agent::{Agent, AgentSeed, DecayOutcome};
pub use error::{AgentError, AgentResult};
pub use record::{ActionKind, ActionRecord, TradeRecord, TradeStatus};
pub use rngs::AgentRngs;
