//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `EmError` as one variant
//! where they need configuration or lookup failures from this crate.

use thiserror::Error;

use crate::{AgentId, Position};

/// The top-level error type for `em-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EmError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `em-*` crates.
pub type EmResult<T> = Result<T, EmError>;
