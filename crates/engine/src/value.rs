use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// A coerced, typed cell value.
///
/// Serializes untagged: `null`, JSON numbers, `"YYYY-MM-DD"` for dates and
/// plain strings for text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Text(String),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type name, used by the CLI and in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Date(_) => "date",
            Value::Text(_) => "text",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Shortest round-trip form; integral values keep a trailing `.0` so a float
/// never renders like an integer.
pub(crate) fn format_float(x: f64) -> String {
    format!("{x:?}")
}

/// Canonical string form, shared by fingerprints and human output.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(Value::Null.to_string(), "None");
        assert_eq!(Value::Integer(25544).to_string(), "25544");
        assert_eq!(Value::Float(51.64).to_string(), "51.64");
        assert_eq!(Value::Float(92.0).to_string(), "92.0");
        let d = NaiveDate::from_ymd_opt(1998, 11, 20).unwrap();
        assert_eq!(Value::Date(d).to_string(), "1998-11-20");
        assert_eq!(Value::text("ISS (ZARYA)").to_string(), "ISS (ZARYA)");
    }

    #[test]
    fn serializes_untagged() {
        let d = NaiveDate::from_ymd_opt(2019, 4, 1).unwrap();
        let values = vec![
            Value::Null,
            Value::Integer(7),
            Value::Float(1.5),
            Value::Date(d),
            Value::text("LEO"),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,7,1.5,"2019-04-01","LEO"]"#);
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Integer(3).as_i64(), Some(3));
        assert_eq!(Value::Float(3.0).as_i64(), None);
        assert_eq!(Value::text("x").as_str(), Some("x"));
        assert!(Value::Null.is_null());
        assert_eq!(Value::Float(1.0).type_name(), "float");
    }
}
