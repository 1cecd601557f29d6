//! Value inference.
//!
//! Producers never declare types. Each field's type is inferred once from the
//! raw text of its JSON literal, by an ordered set of rules where the first
//! match wins:
//!
//! 1. `null` → [`FieldValue::Null`]
//! 2. `true` / `false` → [`FieldValue::Bool`]
//! 3. integer literal (`-?(0|[1-9][0-9]*)`) → [`FieldValue::Int`]
//! 4. general JSON number → [`FieldValue::Float`]
//! 5. `"..."` → [`FieldValue::String`] with the bounding quotes removed verbatim
//!
//! Anything else, arrays and objects included, is a [`FormatError`].

use crate::error::FormatError;

/// Type tag of a field, including the two synthetic column kinds every
/// generated table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Invalid,
    Null,
    Bool,
    Int,
    Float,
    String,
    // never produced by inference
    PrimaryKey,
    Timestamp,
}

/// A classified scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Placeholder for a value that was never classified.
    Invalid,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Invalid => FieldKind::Invalid,
            FieldValue::Null => FieldKind::Null,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::String(_) => FieldKind::String,
        }
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, FieldValue::Invalid)
    }
}

/// Classifies the raw text of one JSON leaf.
pub fn infer(raw: &str) -> Result<FieldValue, FormatError> {
    let text = raw.trim();
    let fail = || FormatError {
        literal: raw.to_string(),
    };

    match text {
        "null" => return Ok(FieldValue::Null),
        "true" => return Ok(FieldValue::Bool(true)),
        "false" => return Ok(FieldValue::Bool(false)),
        _ => {}
    }

    // Integers first: every integer literal is also a number literal.
    if is_integer_literal(text) {
        return text.parse::<i64>().map(FieldValue::Int).map_err(|_| fail());
    }
    if is_number_literal(text) {
        // out-of-range magnitudes parse to infinity; reject them like integer overflow
        return text
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(FieldValue::Float)
            .ok_or_else(fail);
    }
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return Ok(FieldValue::String(text[1..text.len() - 1].to_string()));
    }

    Err(fail())
}

/// Length of the `0|[1-9][0-9]*` run at the start of `s`, or `None`.
fn int_part_len(s: &[u8]) -> Option<usize> {
    match s.first() {
        Some(b'0') => Some(1),
        Some(b'1'..=b'9') => Some(1 + s[1..].iter().take_while(|b| b.is_ascii_digit()).count()),
        _ => None,
    }
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text).as_bytes();
    int_part_len(digits) == Some(digits.len())
}

/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
fn is_number_literal(text: &str) -> bool {
    let s = text.strip_prefix('-').unwrap_or(text).as_bytes();
    let Some(mut i) = int_part_len(s) else {
        return false;
    };

    if s.get(i) == Some(&b'.') {
        let frac = s[i + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if frac == 0 {
            return false;
        }
        i += 1 + frac;
    }

    if matches!(s.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(s.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp = s[i..].iter().take_while(|b| b.is_ascii_digit()).count();
        if exp == 0 {
            return false;
        }
        i += exp;
    }

    i == s.len()
}
