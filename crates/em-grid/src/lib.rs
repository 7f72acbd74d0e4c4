//! `em-grid`: the resource grid of the rust_em simulation.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`cell`]  | `Cell` (red/green food counts), `FoodKind`                  |
//! | [`world`] | `GridWorld`: seeding, replenishment, energy queries        |
//! | [`error`] | `GridError`, `GridResult<T>`                                |
//!
//! The grid is owned exclusively by `em_market::Market`; nothing else holds a
//! mutable reference to it.

pub mod cell;
pub mod error;
pub mod world;


pub use cell::{Cell, FoodKind};
pub use error::{GridError, GridResult};
pub use world::{GridWorld, Replenishment};
