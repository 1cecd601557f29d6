//! Table and field names.
//!
//! Both end up as SQL identifiers (quoted tables, bare columns), so they share
//! one deliberately narrow grammar: one or more ASCII letters, optionally
//! followed by exactly one digit.

use std::fmt;

/// A table or field name as received on the wire.
///
/// Construction never fails; validity is a pure function of the text and is
/// checked with [`Identifier::is_valid`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True iff the name matches `^[A-Za-z]+[0-9]?$`.
    pub fn is_valid(&self) -> bool {
        let bytes = self.0.as_bytes();
        let letters = bytes.iter().take_while(|b| b.is_ascii_alphabetic()).count();
        if letters == 0 {
            return false;
        }
        match &bytes[letters..] {
            [] => true,
            [d] => d.is_ascii_digit(),
            _ => false,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_with_optional_single_digit() {
        for ok in ["ok", "t", "float", "aASFDASdasdasdASDASDASdafasd", "sensor1", "Z9"] {
            assert!(Identifier::from(ok).is_valid(), "{ok:?} should be valid");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for bad in [
            "",
            "no spaces",
            " lead",
            "trail ",
            "1@##$",
            "snake_case",
            "sensor12",
            "1abc",
            "9",
            "a1b",
            "dash-ed",
            "quo\"te",
            "ünïcode",
        ] {
            assert!(!Identifier::from(bad).is_valid(), "{bad:?} should be invalid");
        }
    }
}
