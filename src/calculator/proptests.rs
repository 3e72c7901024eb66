//! Property-based tests for the evaluator.

use proptest::prelude::*;

use super::numeric::round_result;
use super::{AngleMode, ErrorKind, ScalarFunction, apply_function, evaluate_expression};

// Strategy for generating small integers
fn small_int() -> impl Strategy<Value = i64> {
    -1000i64..1000i64
}

// Strategy for generating non-zero integers
fn non_zero_int() -> impl Strategy<Value = i64> {
    prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
}

// Text drawn only from the expression alphabet, so most inputs reach the parser.
fn expression_text() -> impl Strategy<Value = String> {
    "[0-9. +\\-*/%^()]{0,80}"
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(text in expression_text()) {
        prop_assert_eq!(evaluate_expression(&text), evaluate_expression(&text));
    }

    #[test]
    fn arbitrary_input_never_panics(text in any::<String>()) {
        let _ = evaluate_expression(&text);
    }

    #[test]
    fn deep_nesting_never_overflows_stack(text in "[(\\-^1]{0,1000}") {
        let outcome = evaluate_expression(&text);
        if let Some(kind) = outcome.error_kind() {
            prop_assert!(matches!(
                kind,
                ErrorKind::SyntaxError | ErrorKind::TooComplex | ErrorKind::NumericOverflow
            ));
        }
    }

    #[test]
    fn successful_results_are_finite(text in expression_text()) {
        if let Some(value) = evaluate_expression(&text).value() {
            prop_assert!(value.is_finite());
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition(
        a in small_int(),
        b in small_int(),
        c in small_int(),
    ) {
        let outcome = evaluate_expression(&format!("{a}+{b}*{c}"));
        prop_assert_eq!(outcome.value(), Some((a + b * c) as f64));

        let grouped = evaluate_expression(&format!("({a}+{b})*{c}"));
        prop_assert_eq!(grouped.value(), Some(((a + b) * c) as f64));
    }

    #[test]
    fn subtraction_is_left_associative(a in small_int(), b in small_int(), c in small_int()) {
        let outcome = evaluate_expression(&format!("{a}-{b}-{c}"));
        prop_assert_eq!(outcome.value(), Some((a - b - c) as f64));
    }

    #[test]
    fn modulo_matches_floored_division(a in small_int(), b in non_zero_int()) {
        let rem = a % b;
        let expected = if rem != 0 && (rem < 0) != (b < 0) { rem + b } else { rem };
        let outcome = evaluate_expression(&format!("{a}%{b}"));
        prop_assert_eq!(outcome.value(), Some(expected as f64));
    }

    #[test]
    fn division_by_zero_is_reported(a in small_int()) {
        let outcome = evaluate_expression(&format!("{a}/0"));
        prop_assert_eq!(outcome.error_kind(), Some(ErrorKind::DivisionByZero));
    }

    #[test]
    fn rounding_is_idempotent(x in -1.0e4f64..1.0e4f64) {
        let once = round_result(x).unwrap();
        prop_assert_eq!(round_result(once).unwrap(), once);
    }

    #[test]
    fn sqrt_of_square_is_abs(x in -1000i64..1000i64) {
        let squared = ScalarFunction::Square.apply(x as f64, AngleMode::Radians).unwrap();
        let root = apply_function("sqrt", squared, AngleMode::Radians);
        prop_assert_eq!(root.value(), Some(x.abs() as f64));
    }
}
