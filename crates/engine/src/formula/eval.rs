// Amount expression evaluator - recursive descent over the token stream.
//
//   expression := term (('+'|'-') term)*
//   term       := factor (('*'|'/') factor)*
//   factor     := '(' expression ')' | number
//
// There is no unary minus. Division by zero yields inf/NaN.

use super::parser::{self, Token};
use super::EvalError;
use crate::render::Coordinates;

/// Evaluate an already-compiled expression (see `parser::compile`).
pub fn evaluate(compiled: &str) -> Result<f64, EvalError> {
    let tokens = parser::tokenize(compiled)?;
    let (value, pos) = eval_add_sub(&tokens, 0)?;
    if pos < tokens.len() {
        let rest: String = tokens[pos..].iter().map(|t| t.to_string()).collect();
        return Err(EvalError::TrailingInput(rest));
    }
    Ok(value)
}

/// Compile `expression` against `coordinates`, then evaluate it.
pub fn evaluate_in(expression: &str, coordinates: &Coordinates) -> Result<f64, EvalError> {
    evaluate(&parser::compile(expression, coordinates))
}

fn eval_add_sub(tokens: &[Token], pos: usize) -> Result<(f64, usize), EvalError> {
    let (mut left, mut pos) = eval_mul_div(tokens, pos)?;

    while pos < tokens.len() {
        match &tokens[pos] {
            Token::Plus => {
                let (right, new_pos) = eval_mul_div(tokens, pos + 1)?;
                left += right;
                pos = new_pos;
            }
            Token::Minus => {
                let (right, new_pos) = eval_mul_div(tokens, pos + 1)?;
                left -= right;
                pos = new_pos;
            }
            _ => break,
        }
    }

    Ok((left, pos))
}

fn eval_mul_div(tokens: &[Token], pos: usize) -> Result<(f64, usize), EvalError> {
    let (mut left, mut pos) = eval_factor(tokens, pos)?;

    while pos < tokens.len() {
        match &tokens[pos] {
            Token::Star => {
                let (right, new_pos) = eval_factor(tokens, pos + 1)?;
                left *= right;
                pos = new_pos;
            }
            Token::Slash => {
                let (right, new_pos) = eval_factor(tokens, pos + 1)?;
                left /= right;
                pos = new_pos;
            }
            _ => break,
        }
    }

    Ok((left, pos))
}

fn eval_factor(tokens: &[Token], pos: usize) -> Result<(f64, usize), EvalError> {
    match tokens.get(pos) {
        None => Err(EvalError::UnexpectedEnd),
        Some(Token::Number(n)) => Ok((*n, pos + 1)),
        Some(Token::LParen) => {
            let (value, pos) = eval_add_sub(tokens, pos + 1)?;
            match tokens.get(pos) {
                Some(Token::RParen) => Ok((value, pos + 1)),
                _ => Err(EvalError::UnclosedParenthesis),
            }
        }
        Some(other) => Err(EvalError::UnexpectedToken(other.to_string())),
    }
}
