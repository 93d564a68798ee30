//! Infix to postfix conversion (shunting-yard).

use crate::error::CalcError;
use crate::token::{Operator, Token};

/// Convert a whitespace-free infix expression into postfix order.
///
/// Consecutive digits form a single numeral. Operators of equal precedence are
/// left-associative. Parentheses are consumed and never appear in the output.
///
/// # Errors
/// - [`CalcError::Empty`] for an empty input
/// - [`CalcError::UnexpectedChar`] for anything but digits, `+ - * /` and parentheses
///   (this includes whitespace, which the caller strips)
/// - [`CalcError::UnmatchedClose`] / [`CalcError::UnclosedOpen`] for unbalanced parentheses
pub fn to_postfix(expr: &str) -> Result<Vec<Token>, CalcError> {
    if expr.is_empty() {
        return Err(CalcError::Empty);
    }

    let mut output: Vec<Token> = Vec::new();
    let mut stack: Vec<Token> = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if ch.is_ascii_digit() {
            let mut end = offset + ch.len_utf8();
            while let Some(&(next_offset, next)) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                end = next_offset + next.len_utf8();
                chars.next();
            }
            output.push(Token::Number(parse_numeral(expr, offset, end)?));
            continue;
        }

        match ch {
            '(' => stack.push(Token::LeftParen),
            ')' => loop {
                match stack.pop() {
                    Some(Token::LeftParen) => break,
                    Some(token) => output.push(token),
                    None => return Err(CalcError::UnmatchedClose { offset }),
                }
            },
            _ => {
                let op = Operator::from_char(ch).ok_or(CalcError::UnexpectedChar { ch, offset })?;
                while let Some(&top) = stack.last() {
                    if top.stack_precedence() < op.precedence() {
                        break;
                    }
                    output.push(top);
                    stack.pop();
                }
                stack.push(Token::Op(op));
            }
        }
    }

    while let Some(token) = stack.pop() {
        if token == Token::LeftParen {
            return Err(CalcError::UnclosedOpen);
        }
        output.push(token);
    }

    Ok(output)
}

fn parse_numeral(expr: &str, start: usize, end: usize) -> Result<f64, CalcError> {
    let digits = &expr[start..end];
    let value = digits.parse::<f64>().map_err(|_| CalcError::UnexpectedChar {
        ch: digits.chars().next().unwrap_or('0'),
        offset: start,
    })?;
    if !value.is_finite() {
        return Err(CalcError::NumeralOutOfRange { offset: start });
    }
    Ok(value)
}
