//! Input-side helpers for callers of the calculator.
//!
//! Maps display glyphs to canonical operators, decides whether a line of
//! user input should be handed to the evaluator, and recognises scalar
//! function calls such as `sqrt(16)` or `sin 30`.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches strings built only from expression characters (after glyph canonicalisation).
    static ref EXPRESSION_CHARS: Regex = Regex::new(r"^[\d\s\.\+\-\*/%\^()]+$").unwrap();

    /// Matches `name(argument)` or `name argument`.
    static ref FUNCTION_CALL: Regex = Regex::new(
        r"^\s*([A-Za-z][A-Za-z0-9]*)\s*(?:\((.*)\)|\s(.+?))\s*$"
    ).unwrap();
}

/// Display glyphs and their canonical operator characters.
const GLYPHS: &[(char, char)] = &[
    ('×', '*'),
    ('·', '*'),
    ('÷', '/'),
    ('−', '-'),
    ('–', '-'),
];

/// Replace display glyphs (`×`, `÷`, `−`, ...) with the ASCII operators the tokenizer accepts.
pub fn canonicalize_glyphs(input: &str) -> Cow<'_, str> {
    if !input.chars().any(|c| GLYPHS.iter().any(|&(glyph, _)| glyph == c)) {
        return Cow::Borrowed(input);
    }

    Cow::Owned(
        input
            .chars()
            .map(|c| {
                GLYPHS
                    .iter()
                    .find(|&&(glyph, _)| glyph == c)
                    .map_or(c, |&(_, canonical)| canonical)
            })
            .collect(),
    )
}

/// Check if input looks like an arithmetic expression.
///
/// Returns `true` if, after glyph canonicalisation, the input:
/// 1. Contains only expression characters
/// 2. Contains at least one digit
///
/// This is a fast pre-check; it does not validate syntax.
pub fn looks_like_expression(input: &str) -> bool {
    let canonical = canonicalize_glyphs(input.trim());

    if canonical.is_empty() || !EXPRESSION_CHARS.is_match(&canonical) {
        return false;
    }

    canonical.chars().any(|c| c.is_ascii_digit())
}

/// A scalar function call recognised in user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    /// Function name, lowercased.
    pub name: String,
    /// Argument text, still to be evaluated as an expression.
    pub argument: String,
}

/// Recognise `name(argument)` and `name argument`.
///
/// A call covers the whole input: `sqrt(2)*(3)` is not a call, because the
/// closing parenthesis after `2` does not end the input. The name is not
/// checked against the known functions here; that is left to the
/// dispatcher so unknown names get a typed error.
pub fn parse_function_call(input: &str) -> Option<FunctionCall> {
    let captures = FUNCTION_CALL.captures(input)?;
    let name = captures.get(1)?.as_str().to_ascii_lowercase();
    let argument = match captures.get(2) {
        Some(inner) if !parens_balanced(inner.as_str()) => return None,
        Some(inner) => inner,
        None => captures.get(3)?,
    };

    Some(FunctionCall {
        name,
        argument: argument.as_str().trim().to_string(),
    })
}

/// Every `)` closes an earlier `(` and none are left open.
fn parens_balanced(text: &str) -> bool {
    let mut depth: usize = 0;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
