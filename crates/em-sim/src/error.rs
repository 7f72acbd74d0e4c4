use em_core::EmError;
use em_market::MarketError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] EmError),

    #[error("market grid is {got}, configuration says {expected}")]
    BoundsMismatch { expected: String, got: String },

    #[error(transparent)]
    Market(#[from] MarketError),
}

pub type SimResult<T> = Result<T, SimError>;
