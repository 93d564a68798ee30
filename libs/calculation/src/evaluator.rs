//! Postfix evaluation on a value stack.

use crate::error::CalcError;
use crate::token::{Operator, Token};

/// Reduce a postfix token sequence to a single value.
///
/// Arithmetic is done in `f64`; non-exact divisions keep their rounding.
///
/// # Errors
/// - [`CalcError::MissingOperand`] when an operator finds fewer than two values
/// - [`CalcError::DivideByZero`] when the right operand of `/` is zero
/// - [`CalcError::StrayParen`] when the sequence still contains parentheses
/// - [`CalcError::LeftoverOperands`] when the scan does not end with exactly one value
pub fn evaluate(tokens: &[Token]) -> Result<f64, CalcError> {
    let mut stack: Vec<f64> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match *token {
            Token::Number(value) => stack.push(value),
            Token::Op(op) => {
                let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                    return Err(CalcError::MissingOperand { op });
                };
                stack.push(apply(op, a, b)?);
            }
            Token::LeftParen | Token::RightParen => return Err(CalcError::StrayParen),
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        rest => Err(CalcError::LeftoverOperands { count: rest.len() }),
    }
}

fn apply(op: Operator, a: f64, b: f64) -> Result<f64, CalcError> {
    match op {
        Operator::Add => Ok(a + b),
        Operator::Sub => Ok(a - b),
        Operator::Mul => Ok(a * b),
        Operator::Div => {
            if b == 0.0 {
                return Err(CalcError::DivideByZero);
            }
            Ok(a / b)
        }
    }
}
