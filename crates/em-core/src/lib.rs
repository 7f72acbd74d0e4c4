//! `em-core`: foundational types for the `rust_em` grid market simulation.
//!
//! This crate is a dependency of every other `em-*` crate.  It has no `em-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`ids`]     | `AgentId`                                                |
//! | [`geo`]     | `Position`, `Direction`, `GridBounds`, Chebyshev distance |
//! | [`time`]    | `Step`                                                   |
//! | [`config`]  | `MarketConfig`, `FallbackDecision`                       |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)                |
//! | [`error`]   | `EmError`, `EmResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{FallbackDecision, MarketConfig};
pub use error::{EmError, EmResult};
pub use geo::{Direction, GridBounds, Position};
pub use ids::AgentId;
pub use rng::{AgentRng, SimRng};
pub use time::Step;

/// The single scalar resource of the simulation.
///
/// Signed because an agent's balance may drop below zero on the decay that
/// kills it.
pub type Energy = i64;

/// Energy granted by one unit of red food.
pub const RED_FOOD_ENERGY: Energy = 50;

/// Energy granted by one unit of green food.
pub const GREEN_FOOD_ENERGY: Energy = 5;
