use em_core::Position;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Position),
}

pub type GridResult<T> = Result<T, GridError>;
