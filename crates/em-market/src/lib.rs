//! `em-market`: the market of the rust_em simulation, one grid and one roster.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`market`]   | `Market`: placement, spatial queries, move, gather, decay, transfer |
//! | [`ledger`]   | `TradeEntry`, `SystemEnergy`, `DecaySweep`                   |
//! | [`snapshot`] | `MarketSnapshot`: read-only frame for renderers             |
//! | [`error`]    | `MarketError`, `MarketResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on snapshots and trade entries. |

pub mod error;
pub mod ledger;
pub mod market;
pub mod snapshot;


pub use error::{MarketError, MarketResult};
pub use ledger::{DecaySweep, SystemEnergy, TradeEntry};
pub use market::{Market, MoveOutcome, SIGHT_RADIUS};
pub use snapshot::{AgentSnapshot, CellSnapshot, MarketSnapshot};
