//! Evaluation errors.

use thiserror::Error;

use crate::token::Operator;

/// Coarse classification of a [`CalcError`], used by transports to pick a
/// status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input is not a well-formed expression.
    InvalidExpression,
    /// Well-formed expression that divides by zero.
    DivideByZero,
}

/// Reason an expression could not be evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("numeral at offset {offset} does not fit in a finite number")]
    NumeralOutOfRange { offset: usize },

    #[error("closing parenthesis at offset {offset} has no matching '('")]
    UnmatchedClose { offset: usize },

    #[error("opening parenthesis is never closed")]
    UnclosedOpen,

    #[error("operator '{op}' is missing an operand")]
    MissingOperand { op: Operator },

    #[error("expression leaves {count} values instead of one")]
    LeftoverOperands { count: usize },

    #[error("parenthesis in postfix sequence")]
    StrayParen,

    #[error("division by zero")]
    DivideByZero,
}

impl CalcError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DivideByZero => ErrorKind::DivideByZero,
            Self::Empty
            | Self::UnexpectedChar { .. }
            | Self::NumeralOutOfRange { .. }
            | Self::UnmatchedClose { .. }
            | Self::UnclosedOpen
            | Self::MissingOperand { .. }
            | Self::LeftoverOperands { .. }
            | Self::StrayParen => ErrorKind::InvalidExpression,
        }
    }

    #[must_use]
    pub fn is_invalid_expression(&self) -> bool {
        self.kind() == ErrorKind::InvalidExpression
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn only_divide_by_zero_has_its_own_kind() {
        assert_eq!(CalcError::DivideByZero.kind(), ErrorKind::DivideByZero);
        assert!(CalcError::UnclosedOpen.is_invalid_expression());
        assert!(
            CalcError::MissingOperand { op: Operator::Mul }.is_invalid_expression()
        );
        assert!(!CalcError::DivideByZero.is_invalid_expression());
        assert!(CalcError::NumeralOutOfRange { offset: 0 }.is_invalid_expression());
    }

    #[test]
    fn messages_name_the_offending_input() {
        let err = CalcError::UnexpectedChar { ch: 'x', offset: 3 };
        assert_eq!(err.to_string(), "unexpected character 'x' at offset 3");

        let err = CalcError::MissingOperand { op: Operator::Sub };
        assert_eq!(err.to_string(), "operator '-' is missing an operand");
    }
}
