// Amount expression parser - substitutes cell coordinates into the expression text
// and splits the result into tokens.
// Supports: numbers, parentheses, basic math (+, -, *, /)

use std::fmt;

use super::EvalError;
use crate::render::Coordinates;

/// Variables replaced by `compile`, in substitution order.
pub const VARIABLES: [&str; 4] = ["row", "column", "index", "slot"];

/// Substitute a cell's coordinates into an amount expression.
///
/// This is plain text replacement: whitespace is stripped, the text is
/// lower-cased, then `row`, `column`, `index` and `slot` are replaced with
/// their decimal values. Nothing guards against a variable name appearing
/// inside another word.
pub fn compile(expression: &str, coordinates: &Coordinates) -> String {
    let stripped: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    stripped
        .to_lowercase()
        .replace("row", &coordinates.row.to_string())
        .replace("column", &coordinates.column.to_string())
        .replace("index", &coordinates.index.to_string())
        .replace("slot", &coordinates.slot.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '+' => { tokens.push(Token::Plus); chars.next(); }
            '-' => { tokens.push(Token::Minus); chars.next(); }
            '*' => { tokens.push(Token::Star); chars.next(); }
            '/' => { tokens.push(Token::Slash); chars.next(); }
            '(' => { tokens.push(Token::LParen); chars.next(); }
            ')' => { tokens.push(Token::RParen); chars.next(); }
            '0'..='9' | '.' => {
                // Greedy: digits and any number of dots, validated by the float parse
                let mut num_str = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        num_str.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let num: f64 = num_str
                    .parse()
                    .map_err(|_| EvalError::InvalidNumber(num_str.clone()))?;
                tokens.push(Token::Number(num));
            }
            _ => return Err(EvalError::UnexpectedCharacter(c)),
        }
    }

    Ok(tokens)
}
