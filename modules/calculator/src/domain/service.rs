//! Domain service for calculator
//!
//! Stateless: every call evaluates independently, so one instance is shared by
//! all request handlers.

use tracing::{debug, instrument};

use super::error::ServiceError;

/// Domain service that evaluates arithmetic expressions.
#[derive(Clone, Default)]
pub struct Service;

impl Service {
    /// Create a new service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `expression`.
    ///
    /// # Errors
    /// [`ServiceError::Calculation`] when the evaluator rejects the input and
    /// [`ServiceError::Internal`] when the result overflows to a non-finite value.
    #[instrument(skip(self, expression), fields(len = expression.len()))]
    pub fn calculate(&self, expression: &str) -> Result<f64, ServiceError> {
        let value = calculation::calc(expression).map_err(|e| {
            debug!(kind = ?e.kind(), error = %e, "expression rejected");
            ServiceError::from(e)
        })?;

        if !value.is_finite() {
            return Err(ServiceError::internal(format!(
                "result is not a finite number: {value}"
            )));
        }

        debug!(value, "expression evaluated");
        Ok(value)
    }
}
