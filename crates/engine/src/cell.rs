use std::fmt;

use crate::value::format_float;

/// A single untyped cell as handed over by a loader.
///
/// Loaders that already know a native type (the fixed-width parser emits its
/// presence flags as integers) use the numeric variants; everything read from
/// text stays [`RawCell::Text`] until coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// Loader-level missing marker (empty delimited field, absent column).
    Missing,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Default for RawCell {
    fn default() -> Self {
        RawCell::Missing
    }
}

impl RawCell {
    pub fn text(s: impl Into<String>) -> Self {
        RawCell::Text(s.into())
    }

    /// Build a cell from a delimited-file field. Only a truly empty field is
    /// missing; whitespace is kept for the coercer to trim.
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            RawCell::Missing
        } else {
            RawCell::Text(field.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawCell::Missing)
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        RawCell::Text(s.to_string())
    }
}

impl From<i64> for RawCell {
    fn from(n: i64) -> Self {
        RawCell::Int(n)
    }
}

impl From<f64> for RawCell {
    fn from(f: f64) -> Self {
        RawCell::Float(f)
    }
}

/// Fingerprint rendering: missing renders as `None`, text verbatim.
impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Missing => write!(f, "None"),
            RawCell::Int(n) => write!(f, "{n}"),
            RawCell::Float(x) => write!(f, "{}", format_float(*x)),
            RawCell::Text(s) => write!(f, "{s}"),
        }
    }
}
