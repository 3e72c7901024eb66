//! Public entry points of the calculator core.
//!
//! Both functions take and return plain values only, so they can sit behind
//! any transport. Identical input always yields identical output.

use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, trace};

use super::error::{ErrorKind, EvalError, Result};
use super::functions::{AngleMode, ScalarFunction};
use super::parser::{self, DEFAULT_MAX_DEPTH};
use super::token::{format_tokens, tokenize};

/// Default cap on expression length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 1000;

/// Bounds on the work a single evaluation may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum number of characters in an expression.
    pub max_length: usize,
    /// Maximum nesting of parentheses, unary minus and exponent operands.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Result of evaluating a calculator expression or applying a function.
#[derive(Clone, Debug, PartialEq)]
pub enum EvaluationOutcome {
    /// A finite, rounded value.
    Success { value: f64 },
    /// A typed failure with its message.
    Failure { kind: ErrorKind, message: String },
}

impl EvaluationOutcome {
    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value } => Some(*value),
            Self::Failure { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message, .. } => Some(message),
        }
    }
}

impl From<Result<f64>> for EvaluationOutcome {
    fn from(result: Result<f64>) -> Self {
        match result {
            Ok(value) => Self::Success { value },
            Err(err) => Self::Failure {
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }
}

/// Wire shape: `{"ok":true,"value":..}` or `{"ok":false,"errorKind":..,"message":..}`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeWire<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl Serialize for EvaluationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        OutcomeWire {
            ok: self.is_success(),
            value: self.value(),
            error_kind: self.error_kind(),
            message: self.message(),
        }
        .serialize(serializer)
    }
}

/// Evaluate an arithmetic expression with the default [`Limits`].
pub fn evaluate_expression(text: &str) -> EvaluationOutcome {
    evaluate_expression_with(text, &Limits::default())
}

/// Evaluate an arithmetic expression under explicit limits.
pub fn evaluate_expression_with(text: &str, limits: &Limits) -> EvaluationOutcome {
    let outcome = EvaluationOutcome::from(try_evaluate(text, limits));
    debug!(expression = text, ?outcome, "evaluated expression");
    outcome
}

/// Like [`evaluate_expression_with`], but returns the typed error directly.
pub fn try_evaluate(text: &str, limits: &Limits) -> Result<f64> {
    let length = text.chars().count();
    if length > limits.max_length {
        return Err(EvalError::TooComplex(format!(
            "expression has {length} characters, limit is {}",
            limits.max_length
        )));
    }

    let tokens = tokenize(text)?;
    trace!(tokens = %format_tokens(&tokens), "tokenized expression");

    parser::evaluate_with_depth(&tokens, limits.max_depth)
}

/// Apply a named scalar function to `value`.
pub fn apply_function(name: &str, value: f64, angle_mode: AngleMode) -> EvaluationOutcome {
    let result = name
        .parse::<ScalarFunction>()
        .and_then(|function| function.apply(value, angle_mode));
    let outcome = EvaluationOutcome::from(result);
    debug!(function = name, value, %angle_mode, ?outcome, "applied function");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn value(text: &str) -> f64 {
        match evaluate_expression(text) {
            EvaluationOutcome::Success { value } => value,
            other => panic!("expected success for {text:?}, got {other:?}"),
        }
    }

    fn kind(text: &str) -> ErrorKind {
        evaluate_expression(text)
            .error_kind()
            .unwrap_or_else(|| panic!("expected failure for {text:?}"))
    }

    #[test]
    fn test_basic_evaluation() {
        assert_eq!(value("2+3*4"), 14.0);
        assert_eq!(value("(2+3)*4"), 20.0);
        assert_eq!(value("2^3^2"), 512.0);
        assert_eq!(value(" 1.5 * 4 "), 6.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(value("0.1+0.2"), 0.3);
        assert_eq!(value("1.1*3"), 3.3);
        // 0.00146484375 is an exact tie at the tenth digit.
        assert_eq!(value("3/2048"), 0.0014648438);
        assert_eq!(value("1/2048"), 0.0004882812);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(kind("5/0"), ErrorKind::DivisionByZero);
        assert_eq!(kind("5%0"), ErrorKind::ModuloByZero);
        assert_eq!(kind("2+x"), ErrorKind::InvalidCharacter);
        assert_eq!(kind("1.2.3"), ErrorKind::MalformedNumber);
        assert_eq!(kind("(1+2"), ErrorKind::SyntaxError);
        assert_eq!(kind(""), ErrorKind::SyntaxError);
        assert_eq!(kind("   "), ErrorKind::SyntaxError);
        assert_eq!(kind("10^999"), ErrorKind::NumericOverflow);
    }

    #[test]
    fn test_length_limit() {
        let long = vec!["1"; 501].join("+");
        assert!(long.chars().count() > DEFAULT_MAX_LENGTH);
        assert_eq!(kind(&long), ErrorKind::TooComplex);

        let relaxed = Limits {
            max_length: 2000,
            ..Limits::default()
        };
        assert_eq!(evaluate_expression_with(&long, &relaxed).value(), Some(501.0));
    }

    #[test]
    fn test_raised_length_limit_with_long_chain() {
        let limits = Limits {
            max_length: 200_000,
            max_depth: 100,
        };
        let sum = vec!["1"; 50_000].join("+");
        assert_eq!(evaluate_expression_with(&sum, &limits).value(), Some(50_000.0));

        let limits = Limits {
            max_length: usize::MAX,
            max_depth: usize::MAX,
        };
        let deep = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(
            evaluate_expression_with(&deep, &limits).error_kind(),
            Some(ErrorKind::TooComplex)
        );
    }

    #[test]
    fn test_failure_carries_message() {
        let outcome = evaluate_expression("5/0");
        assert!(!outcome.is_success());
        assert_eq!(outcome.message(), Some("division by zero"));
        assert_eq!(outcome.value(), None);
    }

    #[test]
    fn test_determinism() {
        for text in ["2+3*4", "5/0", "2+x", "-2^2", "((1)"] {
            assert_eq!(evaluate_expression(text), evaluate_expression(text));
        }
    }

    #[test]
    fn test_apply_function() {
        assert_eq!(
            apply_function("sqrt", -4.0, AngleMode::Degrees).error_kind(),
            Some(ErrorKind::DomainError)
        );
        assert_eq!(
            apply_function("factorial", 171.0, AngleMode::Degrees).error_kind(),
            Some(ErrorKind::DomainError)
        );
        assert_eq!(
            apply_function("factorial", 5.0, AngleMode::Degrees).value(),
            Some(120.0)
        );
        assert_eq!(apply_function("sin", 90.0, AngleMode::Degrees).value(), Some(1.0));
        assert_eq!(apply_function("asin", 1.0, AngleMode::Degrees).value(), Some(90.0));
        assert!(apply_function("tan", 90.0, AngleMode::Degrees).value().unwrap() > 1e12);
        assert_eq!(
            apply_function("gamma", 1.0, AngleMode::Radians).error_kind(),
            Some(ErrorKind::UnknownFunction)
        );
    }

    #[test]
    fn test_outcome_json_shape() {
        let ok = serde_json::to_value(evaluate_expression("2+3*4")).unwrap();
        assert_eq!(ok, json!({ "ok": true, "value": 14.0 }));

        let err = serde_json::to_value(evaluate_expression("5%0")).unwrap();
        assert_eq!(
            err,
            json!({ "ok": false, "errorKind": "ModuloByZero", "message": "modulo by zero" })
        );
    }
}
