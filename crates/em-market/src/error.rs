use em_agent::AgentError;
use em_core::{AgentId, Position};
use em_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("agent {0} is not on the roster")]
    AgentNotFound(AgentId),

    #[error("agent {0} is dead")]
    AgentDead(AgentId),

    #[error("an agent named {0:?} is already on the roster")]
    DuplicateName(String),

    #[error("seed position {0} is already taken")]
    PositionTaken(Position),

    #[error("agent {0} cannot trade with itself")]
    SelfTrade(AgentId),

    #[error("no free cell left for random placement")]
    NoFreeCell,

    #[error("invalid agent seed: {0}")]
    InvalidSeed(String),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

pub type MarketResult<T> = Result<T, MarketError>;
