use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    /// The oracle answered, but the answer is not a valid decision or verdict.
    #[error("malformed oracle output: {reason}")]
    Malformed { reason: String, raw: String },

    /// The oracle could not produce an answer at all.
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    #[error("context serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl OracleError {
    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        OracleError::Malformed { reason: reason.into(), raw: raw.into() }
    }
}

pub type OracleResult<T> = Result<T, OracleError>;
