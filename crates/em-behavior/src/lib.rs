//! `em-behavior`: the decision-oracle boundary of the rust_em simulation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`decision`] | `Decision` (`Move`, `Gather`, `Wait`, `TradeOffer`), `TradeOffer`, `TradeVerdict` |
//! | [`context`]  | `DecisionContext`, `TradeContext` and their view structs        |
//! | [`model`]    | `DecisionOracle` trait                                          |
//! | [`noop`]     | `WaitOracle`: placeholder that always waits                    |
//! | [`parse`]    | Tagged free-text parsing (`parse_decision`, `parse_verdict`)    |
//! | [`text`]     | `TaggedTextOracle`: adapts a `TextBackend` to the oracle trait |
//! | [`error`]    | `OracleError`, `OracleResult<T>`                                |
//!
//! # Design notes
//!
//! The oracle is external to the simulation core.  It receives owned,
//! serializable snapshots and returns typed values; it never touches the
//! market.  Whatever goes wrong on its side (unparseable text, an unreachable
//! model) surfaces as an `OracleError`, which the turn engine turns into a
//! recorded fallback rather than a failure.

pub mod context;
pub mod decision;
pub mod error;
pub mod model;
pub mod noop;
pub mod parse;
pub mod text;

#[cfg(test)]
mod tests;

pub use context::{CellView, DecisionContext, NeighborView, SelfView, TradeContext};
pub use decision::{Decision, TradeOffer, TradeVerdict};
pub use error::{OracleError, OracleResult};
pub use model::DecisionOracle;
pub use noop::WaitOracle;
pub use parse::{parse_decision, parse_verdict, NO_REASON};
pub use text::{TaggedTextOracle, TextBackend};
