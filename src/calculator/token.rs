//! Tokenizer for arithmetic expressions.
//!
//! Accepts digits, `.`, the operators `+ - * / % ^`, parentheses and
//! whitespace. Anything else is rejected at the first offending character.

use std::fmt;

use super::error::LexError;

/// Binary operator kinds. `Sub` doubles as unary minus in the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl OperatorKind {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '%' => Some(Self::Mod),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Mod => '%',
            Self::Pow => '^',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(OperatorKind),
    LeftParen,
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Operator(op) => write!(f, "{}", op.symbol()),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
        }
    }
}

/// Split `text` into tokens, left to right. Whitespace is dropped.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            tokens.push(Token::Number(parse_number(&chars[start..i], start)?));
            continue;
        }

        let token = match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            _ => match OperatorKind::from_char(c) {
                Some(op) => Token::Operator(op),
                None => {
                    return Err(LexError::InvalidCharacter {
                        position: i,
                        character: c,
                    });
                }
            },
        };
        tokens.push(token);
        i += 1;
    }

    Ok(tokens)
}

/// Parse a run of digits and points. At most one point, and at least one digit.
fn parse_number(run: &[char], position: usize) -> Result<f64, LexError> {
    let points = run.iter().filter(|&&c| c == '.').count();
    if points > 1 || run.len() == points {
        return Err(LexError::MalformedNumber { position });
    }

    let literal: String = run.iter().collect();
    // "5." and ".5" are both accepted by f64::from_str.
    literal
        .parse::<f64>()
        .map_err(|_| LexError::MalformedNumber { position })
}

/// Render tokens back to canonical text, space separated. Used for logging.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
