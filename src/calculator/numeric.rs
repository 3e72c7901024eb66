//! Numeric result policy shared by the evaluator and the scalar functions.

use super::error::{EvalError, Result};

/// Fractional digits kept in every reported result.
pub const PRECISION: usize = 10;

/// Reject infinities and NaN.
pub fn ensure_finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NumericOverflow)
    }
}

/// Round to [`PRECISION`] fractional digits, ties to even.
///
/// Formatting works on the exact binary value, so artifacts such as
/// `0.30000000000000004` collapse to `0.3`. Negative zero becomes zero.
pub fn round_result(value: f64) -> Result<f64> {
    let value = ensure_finite(value)?;
    let rounded: f64 = format!("{value:.precision$}", precision = PRECISION)
        .parse()
        .map_err(|_| EvalError::NumericOverflow)?;
    let rounded = ensure_finite(rounded)?;
    Ok(if rounded == 0.0 { 0.0 } else { rounded })
}

/// Modulo with floored division: the result takes the sign of the divisor.
pub fn floored_mod(lhs: f64, rhs: f64) -> f64 {
    let rem = lhs % rhs;
    if rem != 0.0 && (rem < 0.0) != (rhs < 0.0) {
        rem + rhs
    } else {
        rem
    }
}
