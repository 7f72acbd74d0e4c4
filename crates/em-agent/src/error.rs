use em_core::{AgentId, Energy};
use thiserror::Error;

/// Reasons an agent refuses to part with energy.
///
/// `InsufficientResource` and `WouldNotSurvive` together form the
/// insufficient-resource condition reported by the trade protocol.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentError {
    #[error("agent {0} is dead")]
    Dead(AgentId),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Energy),

    #[error("cannot spend {amount} with only {energy} energy")]
    InsufficientResource { energy: Energy, amount: Energy },

    #[error("spending would leave {remaining} energy, not above the per-turn loss of {energy_loss_per_turn}")]
    WouldNotSurvive { remaining: Energy, energy_loss_per_turn: Energy },
}

pub type AgentResult<T> = Result<T, AgentError>;
