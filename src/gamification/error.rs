use thiserror::Error;

/// Failures surfaced by the ledger, the evaluator and the facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GamificationError {
    /// Bad points or pet id, rejected before any store access, or an award
    /// that would overflow the stored total.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The balance or grant store could not be reached or timed out.
    #[error("Gamification store unavailable: {0}")]
    StoreUnavailable(String),
}

impl GamificationError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        GamificationError::InvalidInput(message.into())
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        GamificationError::StoreUnavailable(message.into())
    }
}

impl From<sqlx::Error> for GamificationError {
    fn from(err: sqlx::Error) -> Self {
        GamificationError::StoreUnavailable(err.to_string())
    }
}
