//! Named scalar functions (square root, logarithms, trig, factorial, ...).
//!
//! Each function takes one finite number and an [`AngleMode`]. Forward trig
//! functions read their input in the angle mode; inverse trig functions
//! report their output in it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::{EvalError, Result};
use super::numeric::round_result;

/// Largest factorial argument whose result fits in an `f64`.
pub const MAX_FACTORIAL: u32 = 170;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Degrees => "degrees",
            Self::Radians => "radians",
        }
    }

    fn angle_to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Degrees => angle.to_radians(),
            Self::Radians => angle,
        }
    }

    fn radians_to_angle(self, angle: f64) -> f64 {
        match self {
            Self::Degrees => angle.to_degrees(),
            Self::Radians => angle,
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown angle mode '{0}' (expected 'degrees' or 'radians')")]
pub struct ParseAngleModeError(String);

impl FromStr for AngleMode {
    type Err = ParseAngleModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrees" | "degree" | "deg" => Ok(Self::Degrees),
            "radians" | "radian" | "rad" => Ok(Self::Radians),
            _ => Err(ParseAngleModeError(s.to_string())),
        }
    }
}

/// The closed set of scalar functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarFunction {
    Sqrt,
    Cbrt,
    Square,
    Abs,
    Ln,
    Log10,
    Reciprocal,
    Exp,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Factorial,
}

impl ScalarFunction {
    pub const ALL: [ScalarFunction; 15] = [
        Self::Sqrt,
        Self::Cbrt,
        Self::Square,
        Self::Abs,
        Self::Ln,
        Self::Log10,
        Self::Reciprocal,
        Self::Exp,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Factorial,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Square => "square",
            Self::Abs => "abs",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::Reciprocal => "reciprocal",
            Self::Exp => "exp",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Factorial => "factorial",
        }
    }

    /// Apply the function to `value`, with domain guards and result rounding.
    pub fn apply(self, value: f64, angle_mode: AngleMode) -> Result<f64> {
        if !value.is_finite() {
            return Err(EvalError::domain(format!(
                "{} requires a finite input",
                self.name()
            )));
        }

        let raw = match self {
            Self::Sqrt => {
                if value < 0.0 {
                    return Err(EvalError::domain("square root of a negative number"));
                }
                value.sqrt()
            }
            Self::Cbrt => value.cbrt(),
            Self::Square => value * value,
            Self::Abs => value.abs(),
            Self::Ln => require_positive(self, value)?.ln(),
            Self::Log10 => require_positive(self, value)?.log10(),
            Self::Reciprocal => {
                if value == 0.0 {
                    return Err(EvalError::domain("reciprocal of zero"));
                }
                1.0 / value
            }
            Self::Exp => value.exp(),
            Self::Sin => angle_mode.angle_to_radians(value).sin(),
            Self::Cos => angle_mode.angle_to_radians(value).cos(),
            Self::Tan => angle_mode.angle_to_radians(value).tan(),
            Self::Asin => angle_mode.radians_to_angle(require_unit_interval(self, value)?.asin()),
            Self::Acos => angle_mode.radians_to_angle(require_unit_interval(self, value)?.acos()),
            Self::Atan => angle_mode.radians_to_angle(value.atan()),
            Self::Factorial => factorial(value)?,
        };

        round_result(raw)
    }
}

impl fmt::Display for ScalarFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarFunction {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|function| function.name() == lower)
            .ok_or_else(|| EvalError::UnknownFunction(s.trim().to_string()))
    }
}

fn require_positive(function: ScalarFunction, value: f64) -> Result<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(EvalError::domain(format!(
            "{function} requires a positive input"
        )))
    }
}

fn require_unit_interval(function: ScalarFunction, value: f64) -> Result<f64> {
    if (-1.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(EvalError::domain(format!(
            "{function} requires an input between -1 and 1"
        )))
    }
}

fn factorial(value: f64) -> Result<f64> {
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(MAX_FACTORIAL) {
        return Err(EvalError::domain(format!(
            "factorial requires a whole number between 0 and {MAX_FACTORIAL}"
        )));
    }
    let n = value as u32;
    Ok((2..=n).fold(1.0, |acc, k| acc * f64::from(k)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::error::ErrorKind;

    fn deg(function: ScalarFunction, value: f64) -> Result<f64> {
        function.apply(value, AngleMode::Degrees)
    }

    fn rad(function: ScalarFunction, value: f64) -> Result<f64> {
        function.apply(value, AngleMode::Radians)
    }

    #[test]
    fn test_names_round_trip() {
        for function in ScalarFunction::ALL {
            assert_eq!(function.name().parse::<ScalarFunction>().unwrap(), function);
        }
        assert_eq!("  SQRT ".parse::<ScalarFunction>().unwrap(), ScalarFunction::Sqrt);
        assert_eq!(
            "hypot".parse::<ScalarFunction>(),
            Err(EvalError::UnknownFunction("hypot".into()))
        );
    }

    #[test]
    fn test_roots_and_powers() {
        assert_eq!(deg(ScalarFunction::Sqrt, 16.0).unwrap(), 4.0);
        assert_eq!(deg(ScalarFunction::Sqrt, 0.0).unwrap(), 0.0);
        assert_eq!(deg(ScalarFunction::Sqrt, 2.0).unwrap(), 1.4142135624);
        assert_eq!(deg(ScalarFunction::Cbrt, -27.0).unwrap(), -3.0);
        assert_eq!(deg(ScalarFunction::Square, -1.5).unwrap(), 2.25);
        assert_eq!(deg(ScalarFunction::Abs, -7.25).unwrap(), 7.25);
    }

    #[test]
    fn test_domain_guards() {
        let cases = [
            (ScalarFunction::Sqrt, -4.0),
            (ScalarFunction::Ln, 0.0),
            (ScalarFunction::Ln, -1.0),
            (ScalarFunction::Log10, 0.0),
            (ScalarFunction::Reciprocal, 0.0),
            (ScalarFunction::Asin, 1.5),
            (ScalarFunction::Acos, -1.01),
            (ScalarFunction::Factorial, -1.0),
            (ScalarFunction::Factorial, 2.5),
            (ScalarFunction::Factorial, 171.0),
        ];
        for (function, value) in cases {
            let err = deg(function, value).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DomainError, "{function}({value})");
        }
    }

    #[test]
    fn test_non_finite_input_rejected() {
        assert_eq!(
            deg(ScalarFunction::Abs, f64::NAN).unwrap_err().kind(),
            ErrorKind::DomainError
        );
        assert_eq!(
            deg(ScalarFunction::Exp, f64::INFINITY).unwrap_err().kind(),
            ErrorKind::DomainError
        );
    }

    #[test]
    fn test_logarithms_and_exp() {
        assert_eq!(deg(ScalarFunction::Ln, 1.0).unwrap(), 0.0);
        assert_eq!(deg(ScalarFunction::Log10, 1000.0).unwrap(), 3.0);
        assert_eq!(deg(ScalarFunction::Exp, 0.0).unwrap(), 1.0);
        assert_eq!(deg(ScalarFunction::Exp, 1.0).unwrap(), 2.7182818285);
        assert_eq!(deg(ScalarFunction::Exp, 1000.0), Err(EvalError::NumericOverflow));
        assert_eq!(deg(ScalarFunction::Reciprocal, 4.0).unwrap(), 0.25);
    }

    #[test]
    fn test_square_overflow() {
        assert_eq!(deg(ScalarFunction::Square, 1e200), Err(EvalError::NumericOverflow));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(deg(ScalarFunction::Factorial, 0.0).unwrap(), 1.0);
        assert_eq!(deg(ScalarFunction::Factorial, 5.0).unwrap(), 120.0);
        assert_eq!(deg(ScalarFunction::Factorial, 10.0).unwrap(), 3628800.0);
        assert!(deg(ScalarFunction::Factorial, 170.0).unwrap().is_finite());
    }

    #[test]
    fn test_forward_trig_in_degrees() {
        assert_eq!(deg(ScalarFunction::Sin, 90.0).unwrap(), 1.0);
        assert_eq!(deg(ScalarFunction::Sin, 30.0).unwrap(), 0.5);
        assert_eq!(deg(ScalarFunction::Sin, 180.0).unwrap(), 0.0);
        assert_eq!(deg(ScalarFunction::Cos, 60.0).unwrap(), 0.5);
        assert_eq!(deg(ScalarFunction::Cos, 90.0).unwrap(), 0.0);
        assert_eq!(deg(ScalarFunction::Tan, 45.0).unwrap(), 1.0);
    }

    #[test]
    fn test_tan_near_right_angles_is_large_but_finite() {
        // The degree-to-radian conversion never lands exactly on the pole.
        for angle in [90.0, 270.0, -90.0, 450.0] {
            let value = deg(ScalarFunction::Tan, angle).unwrap();
            assert!(value.is_finite());
            assert!(value.abs() > 1e12, "tan({angle}°) = {value}");
        }
        assert_eq!(deg(ScalarFunction::Tan, 180.0).unwrap(), 0.0);
        assert_eq!(rad(ScalarFunction::Tan, 90.0).unwrap(), -1.9952004122);
    }

    #[test]
    fn test_inverse_trig_reports_in_angle_mode() {
        assert_eq!(deg(ScalarFunction::Asin, 1.0).unwrap(), 90.0);
        assert_eq!(deg(ScalarFunction::Acos, 0.5).unwrap(), 60.0);
        assert_eq!(deg(ScalarFunction::Atan, 1.0).unwrap(), 45.0);
        assert_eq!(rad(ScalarFunction::Asin, 1.0).unwrap(), 1.5707963268);
        assert_eq!(rad(ScalarFunction::Atan, 1.0).unwrap(), 0.7853981634);
    }

    #[test]
    fn test_trig_in_radians() {
        assert_eq!(rad(ScalarFunction::Sin, 0.0).unwrap(), 0.0);
        assert_eq!(rad(ScalarFunction::Cos, 0.0).unwrap(), 1.0);
        assert_eq!(rad(ScalarFunction::Sin, std::f64::consts::PI).unwrap(), 0.0);
    }

    #[test]
    fn test_angle_mode_parsing() {
        assert_eq!("degrees".parse::<AngleMode>().unwrap(), AngleMode::Degrees);
        assert_eq!("RAD".parse::<AngleMode>().unwrap(), AngleMode::Radians);
        assert!("gradians".parse::<AngleMode>().is_err());
        assert_eq!(AngleMode::default(), AngleMode::Degrees);
        assert_eq!(AngleMode::Radians.to_string(), "radians");
    }
}
