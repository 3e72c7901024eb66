//! Calculator core for evaluating arithmetic expressions.
//!
//! This module provides functionality to:
//! - Tokenize expression text
//! - Parse and evaluate tokens with operator precedence
//! - Apply named scalar functions (roots, logarithms, trig, factorial)
//! - Detect and canonicalise expression-like user input
//!
//! Everything here is a pure function of its input: no shared state, no I/O.

mod detection;
mod error;
mod evaluation;
mod functions;
mod numeric;
mod parser;
mod token;

#[cfg(test)]
mod proptests;

pub use detection::{FunctionCall, canonicalize_glyphs, looks_like_expression, parse_function_call};
pub use error::{ErrorKind, EvalError, LexError};
pub use evaluation::{
    DEFAULT_MAX_LENGTH, EvaluationOutcome, Limits, apply_function, evaluate_expression,
    evaluate_expression_with, try_evaluate,
};
pub use functions::{AngleMode, MAX_FACTORIAL, ParseAngleModeError, ScalarFunction};
pub use numeric::PRECISION;
pub use parser::{
    Associativity, Binding, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING, binding, evaluate,
    evaluate_with_depth,
};
pub use token::{OperatorKind, Token, tokenize};
