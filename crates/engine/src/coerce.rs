//! Schema-less coercion of raw cells into typed values.
//!
//! Precedence, first hit wins:
//!
//! | # | Input                                   | Result            |
//! |---|-----------------------------------------|-------------------|
//! | 1 | missing cell, native NaN                | `Null`            |
//! | 2 | native integer / float                  | passed through    |
//! | 3 | text: trim surrounding whitespace       |                   |
//! | 4 | integer after dropping `,` separators   | `Integer`         |
//! | 5 | float after dropping `,` separators     | `Float`           |
//! | 6 | `MM/DD/YY`, `MM/DD/YYYY`, `YYYY/MM/DD`  | `Date`            |
//! | 7 | empty or `N/A`                          | `Null`            |
//! | 8 | anything else                           | trimmed `Text`    |
//!
//! Coercion never fails. A failed parse falls through to the next step.

use chrono::NaiveDate;

use crate::cell::RawCell;
use crate::value::Value;

/// Placeholder the registry uses for "not applicable".
pub const NOT_AVAILABLE: &str = "N/A";

/// Two-digit years at or above this map to the 1900s, below it to the 2000s.
const SHORT_YEAR_PIVOT: i32 = 69;

/// Coerce a loader cell.
pub fn coerce_cell(cell: &RawCell) -> Value {
    match cell {
        RawCell::Missing => Value::Null,
        RawCell::Float(x) if x.is_nan() => Value::Null,
        RawCell::Int(n) => Value::Integer(*n),
        RawCell::Float(x) => Value::Float(*x),
        RawCell::Text(s) => coerce(s),
    }
}

/// Re-coerce an already typed value. Only text can still change, which makes
/// coercion idempotent.
pub fn coerce_value(value: &Value) -> Value {
    match value {
        Value::Text(s) => coerce(s),
        Value::Float(x) if x.is_nan() => Value::Null,
        other => other.clone(),
    }
}

/// Coerce a raw string.
pub fn coerce(raw: &str) -> Value {
    let trimmed = raw.trim();

    let digits = trimmed.replace(',', "");
    if let Ok(n) = digits.parse::<i64>() {
        return Value::Integer(n);
    }
    if let Ok(x) = digits.parse::<f64>() {
        return Value::Float(x);
    }

    if let Some(date) = parse_date(trimmed) {
        return Value::Date(date);
    }

    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        return Value::Null;
    }

    Value::Text(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Accepted date layouts, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// `MM/DD/YY`
    MonthDayShortYear,
    /// `MM/DD/YYYY`
    MonthDayYear,
    /// `YYYY/MM/DD`
    YearMonthDay,
}

pub const DATE_PATTERNS: [DatePattern; 3] = [
    DatePattern::MonthDayShortYear,
    DatePattern::MonthDayYear,
    DatePattern::YearMonthDay,
];

impl DatePattern {
    /// Parse `s` if it matches this layout completely. Month and day take one
    /// or two digits, years exactly two or four.
    pub fn parse(self, s: &str) -> Option<NaiveDate> {
        let [a, b, c] = split_date_parts(s)?;
        match self {
            DatePattern::MonthDayShortYear => {
                if !short(a) || !short(b) || c.len() != 2 {
                    return None;
                }
                let yy: i32 = c.parse().ok()?;
                let year = if yy >= SHORT_YEAR_PIVOT { 1900 + yy } else { 2000 + yy };
                NaiveDate::from_ymd_opt(year, a.parse().ok()?, b.parse().ok()?)
            }
            DatePattern::MonthDayYear => {
                if !short(a) || !short(b) || c.len() != 4 {
                    return None;
                }
                ymd(c, a, b)
            }
            DatePattern::YearMonthDay => {
                if a.len() != 4 || !short(b) || !short(c) {
                    return None;
                }
                ymd(a, b, c)
            }
        }
    }
}

/// Try every [`DatePattern`] in order.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_PATTERNS.iter().find_map(|p| p.parse(s))
}

fn split_date_parts(s: &str) -> Option<[&str; 3]> {
    let mut it = s.split('/');
    let parts = [it.next()?, it.next()?, it.next()?];
    if it.next().is_some() {
        return None;
    }
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }
    Some(parts)
}

fn short(part: &str) -> bool {
    (1..=2).contains(&part.len())
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn integers() {
        assert_eq!(coerce("  42  "), Value::Integer(42));
        assert_eq!(coerce("1,234"), Value::Integer(1234));
        assert_eq!(coerce("-7"), Value::Integer(-7));
        assert_eq!(coerce("25544"), Value::Integer(25544));
    }

    #[test]
    fn floats() {
        assert_eq!(coerce("51.64"), Value::Float(51.64));
        assert_eq!(coerce("1,234.5"), Value::Float(1234.5));
        assert_eq!(coerce(" 0.000167 "), Value::Float(0.000167));
        assert_eq!(coerce("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn nulls() {
        assert_eq!(coerce(""), Value::Null);
        assert_eq!(coerce("   "), Value::Null);
        assert_eq!(coerce("N/A"), Value::Null);
        assert_eq!(coerce(" N/A "), Value::Null);
        assert_eq!(coerce_cell(&RawCell::Missing), Value::Null);
        assert_eq!(coerce_cell(&RawCell::Float(f64::NAN)), Value::Null);
    }

    #[test]
    fn sentinel_is_case_sensitive() {
        assert_eq!(coerce("n/a"), Value::text("n/a"));
    }

    #[test]
    fn native_numbers_pass_through() {
        assert_eq!(coerce_cell(&RawCell::Int(1)), Value::Integer(1));
        assert_eq!(coerce_cell(&RawCell::Float(2.5)), Value::Float(2.5));
    }

    #[test]
    fn short_year_dates() {
        assert_eq!(coerce("11/20/98"), date(1998, 11, 20));
        assert_eq!(coerce("4/1/19"), date(2019, 4, 1));
        assert_eq!(coerce("01/01/69"), date(1969, 1, 1));
        assert_eq!(coerce("12/31/68"), date(2068, 12, 31));
    }

    #[test]
    fn long_year_dates() {
        assert_eq!(coerce("11/20/1998"), date(1998, 11, 20));
        assert_eq!(coerce("1998/11/20"), date(1998, 11, 20));
        assert_eq!(coerce(" 1957/10/4 "), date(1957, 10, 4));
    }

    #[test]
    fn first_pattern_wins() {
        assert_eq!(
            DatePattern::MonthDayShortYear.parse("10/04/57"),
            NaiveDate::from_ymd_opt(1957, 10, 4)
        );
        assert_eq!(DatePattern::MonthDayShortYear.parse("10/04/1957"), None);
        assert_eq!(DatePattern::MonthDayYear.parse("1957/10/04"), None);
    }

    #[test]
    fn malformed_dates_stay_text() {
        assert_eq!(coerce("13/45/2019"), Value::text("13/45/2019"));
        assert_eq!(coerce("02/30/2019"), Value::text("02/30/2019"));
        assert_eq!(coerce("2019-04-01"), Value::text("2019-04-01"));
        assert_eq!(coerce("1/2/345"), Value::text("1/2/345"));
        assert_eq!(coerce("1/2/3/4"), Value::text("1/2/3/4"));
        assert_eq!(coerce("0000/01/01"), Value::text("0000/01/01"));
        assert_eq!(coerce("001/01/2019"), Value::text("001/01/2019"));
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(coerce("  ISS (ZARYA) "), Value::text("ISS (ZARYA)"));
        assert_eq!(coerce("1998-067A"), Value::text("1998-067A"));
    }

    #[test]
    fn recoercion_is_identity_on_typed_values() {
        let d = date(2019, 4, 1);
        assert_eq!(coerce_value(&d), d);
        assert_eq!(coerce_value(&Value::Integer(5)), Value::Integer(5));
        assert_eq!(coerce_value(&Value::text(" 12 ")), Value::Integer(12));
    }

    proptest! {
        #[test]
        fn thousands_separated_integers(n in 0i64..1_000_000_000_000) {
            let mut grouped = String::new();
            let digits = n.to_string();
            for (i, ch) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    grouped.push(',');
                }
                grouped.push(ch);
            }
            prop_assert_eq!(coerce(&grouped), Value::Integer(n));
        }

        #[test]
        fn coercion_is_idempotent(s in "[ -~]{0,16}") {
            let once = coerce(&s);
            prop_assume!(!matches!(once, Value::Float(x) if x.is_nan()));
            prop_assert_eq!(coerce_value(&once), once.clone());
        }

        #[test]
        fn calendar_dates_round_trip(y in 1900i32..2100, m in 1u32..=12, d in 1u32..=28) {
            let expected = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            prop_assert_eq!(coerce(&format!("{m}/{d}/{y}")), Value::Date(expected));
            prop_assert_eq!(coerce(&format!("{y}/{m:02}/{d:02}")), Value::Date(expected));
        }
    }
}
