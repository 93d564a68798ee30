//! REST DTOs for calculator module
//!
//! These types are transport-specific (serde + utoipa for REST/OpenAPI).

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Request to evaluate an expression.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CalculateRequest {
    /// Infix expression over non-negative integers, `+ - * /` and parentheses
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "2 + 2 * 2")]
    pub expression: String,
}

/// Missing and `null` both read as an empty expression.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Response envelope: exactly one of `result` or `error` is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalculationResponse {
    /// Value formatted with six fractional digits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "6.000000")]
    pub result: Option<String>,
    /// Human-readable failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculationResponse {
    #[must_use]
    pub fn result(value: f64) -> Self {
        Self {
            result: Some(format!("{value:.6}")),
            error: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(message.into()),
        }
    }
}
