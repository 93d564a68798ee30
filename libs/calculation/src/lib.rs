//! Arithmetic expression evaluation.
//!
//! Expressions are made of non-negative integer literals, the binary operators
//! `+ - * /` and parentheses. Whitespace is ignored. Evaluation runs in two
//! stages:
//! - [`to_postfix`] scans the expression and converts it to Reverse Polish
//!   order with the shunting-yard algorithm
//! - [`evaluate`] reduces the postfix sequence on a value stack
//!
//! [`calc`] chains both stages and is what transports call.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod error;
pub mod evaluator;
pub mod postfix;
pub mod token;

pub use error::{CalcError, ErrorKind};
pub use evaluator::evaluate;
pub use postfix::to_postfix;
pub use token::{Operator, Token};

/// Evaluate an infix arithmetic expression.
///
/// All whitespace is stripped first; an expression with nothing left is
/// rejected. The first failure of either stage is returned as is.
///
/// # Errors
/// Returns [`CalcError`] of kind [`ErrorKind::InvalidExpression`] for malformed
/// input or a numeral too large for `f64`, and [`CalcError::DivideByZero`] when a divisor evaluates to zero.
pub fn calc(expression: &str) -> Result<f64, CalcError> {
    let stripped: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return Err(CalcError::Empty);
    }

    let postfix = to_postfix(&stripped)?;
    tracing::trace!(tokens = postfix.len(), "converted expression to postfix");
    evaluate(&postfix)
}
