//! Error taxonomy for the calculator core.
//!
//! Every failure is a typed value carrying a stable [`ErrorKind`] and a
//! human-readable message. Nothing in the core formats errors for display;
//! that is left to the caller (see `crate::render`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised while turning text into tokens.
///
/// Positions are zero-based indices of Unicode scalar values in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter { position: usize, character: char },

    #[error("malformed number at position {position}")]
    MalformedNumber { position: usize },
}

impl LexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            Self::MalformedNumber { .. } => ErrorKind::MalformedNumber,
        }
    }

    /// Position of the offending character in the source text.
    pub fn position(&self) -> usize {
        match self {
            Self::InvalidCharacter { position, .. } | Self::MalformedNumber { position } => {
                *position
            }
        }
    }
}

/// Failures raised while evaluating tokens or applying a scalar function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("syntax error: {0}")]
    SyntaxError(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("domain error: {0}")]
    DomainError(String),

    #[error("numeric overflow")]
    NumericOverflow,

    #[error("expression too complex: {0}")]
    TooComplex(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex(err) => err.kind(),
            Self::SyntaxError(_) => ErrorKind::SyntaxError,
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::ModuloByZero => ErrorKind::ModuloByZero,
            Self::DomainError(_) => ErrorKind::DomainError,
            Self::NumericOverflow => ErrorKind::NumericOverflow,
            Self::TooComplex(_) => ErrorKind::TooComplex,
            Self::UnknownFunction(_) => ErrorKind::UnknownFunction,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        Self::SyntaxError(message.into())
    }

    pub(crate) fn domain(message: impl Into<String>) -> Self {
        Self::DomainError(message.into())
    }
}

/// Flat, serialisable classification of every error the core can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidCharacter,
    MalformedNumber,
    SyntaxError,
    DivisionByZero,
    ModuloByZero,
    DomainError,
    NumericOverflow,
    TooComplex,
    UnknownFunction,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidCharacter => "InvalidCharacter",
            Self::MalformedNumber => "MalformedNumber",
            Self::SyntaxError => "SyntaxError",
            Self::DivisionByZero => "DivisionByZero",
            Self::ModuloByZero => "ModuloByZero",
            Self::DomainError => "DomainError",
            Self::NumericOverflow => "NumericOverflow",
            Self::TooComplex => "TooComplex",
            Self::UnknownFunction => "UnknownFunction",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Result<T, E = EvalError> = std::result::Result<T, E>;
