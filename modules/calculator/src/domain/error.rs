use calculation::{CalcError, ErrorKind};
use thiserror::Error;

/// Error type for Service operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The expression was rejected by the evaluator
    #[error(transparent)]
    Calculation(#[from] CalcError),

    /// Anything the caller could not have caused by its input
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Evaluator error kind, `None` for internal failures.
    #[must_use]
    pub fn calc_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Calculation(e) => Some(e.kind()),
            Self::Internal(_) => None,
        }
    }
}
