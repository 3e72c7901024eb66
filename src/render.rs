//! Presentation of evaluation outcomes.
//!
//! The calculator core never formats for display; this module turns an
//! [`EvaluationOutcome`] into display and clipboard text.

use crate::calculator::{EvaluationOutcome, PRECISION};

/// Text shown in place of a result when evaluation fails.
pub const ERROR_TEXT: &str = "Error";

/// Magnitude from which results are shown in scientific notation.
const SCIENTIFIC_THRESHOLD: f64 = 1e21;

/// A rendered calculation, ready to print.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedResult {
    /// The expression (or function call) as entered by the user.
    pub expression: String,
    /// The result formatted for display (with thousand separators when enabled).
    pub display_result: String,
    /// The result formatted for clipboard (raw number).
    /// None if the result is an error.
    pub clipboard_result: Option<String>,
    /// Error message, if evaluation failed.
    pub error_message: Option<String>,
}

impl RenderedResult {
    /// Create a rendered result from an evaluation outcome.
    pub fn from_outcome(
        expression: impl Into<String>,
        outcome: &EvaluationOutcome,
        thousands_separator: bool,
    ) -> Self {
        let expression = expression.into();
        match outcome {
            EvaluationOutcome::Success { value } => Self {
                expression,
                display_result: format_display(*value, thousands_separator),
                clipboard_result: Some(format_clipboard(*value)),
                error_message: None,
            },
            EvaluationOutcome::Failure { message, .. } => Self {
                expression,
                display_result: ERROR_TEXT.to_string(),
                clipboard_result: None,
                error_message: Some(message.clone()),
            },
        }
    }

    /// Check if this is an error result.
    pub fn is_error(&self) -> bool {
        self.error_message.is_some()
    }

    /// Get the text to copy to clipboard.
    /// Returns the clipboard result for successful calculations,
    /// or the display text for errors.
    pub fn text_for_clipboard(&self) -> &str {
        self.clipboard_result
            .as_deref()
            .unwrap_or(&self.display_result)
    }
}

/// Format a number for display, optionally with thousand separators.
pub fn format_display(value: f64, thousands_separator: bool) -> String {
    let raw = format_clipboard(value);
    if !thousands_separator || value.abs() >= SCIENTIFIC_THRESHOLD {
        return raw;
    }

    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    format!("{sign}{}{frac_part}", group_thousands(int_part))
}

/// Format a number for clipboard (raw number, no separators).
pub fn format_clipboard(value: f64) -> String {
    if value.abs() >= SCIENTIFIC_THRESHOLD {
        return format!("{value:e}");
    }

    let formatted = format!("{value:.precision$}", precision = PRECISION);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Insert a comma every three digits of an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
