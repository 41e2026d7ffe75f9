//! Fixed-width tracking catalog records.
//!
//! One catalog line is sliced by a fixed table of half-open, 0-indexed
//! column ranges. Offsets count characters of the decoded line, which for the
//! ASCII catalog are the same as bytes. A short line never fails: slices past
//! the end come back empty.

use crate::cell::RawCell;
use crate::dataset::RawRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Passed through verbatim for the coercer.
    Raw,
    /// `1` if the column holds any character at all (a space included), else `0`.
    PresenceFlag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
    pub kind: FieldKind,
}

const fn raw(name: &'static str, start: usize, end: usize) -> FieldSpan {
    FieldSpan { name, start, end, kind: FieldKind::Raw }
}

const fn flag(name: &'static str, start: usize) -> FieldSpan {
    FieldSpan { name, start, end: start + 1, kind: FieldKind::PresenceFlag }
}

/// Column layout of a tracking catalog line, in output order.
pub const CATALOG_LAYOUT: [FieldSpan; 16] = [
    raw("intl_desg", 0, 11),
    raw("norad_num", 13, 18),
    flag("multiple_name_flag", 19),
    flag("payload_flag", 20),
    raw("ops_status_code", 21, 22),
    raw("name", 23, 47),
    raw("source", 49, 54),
    raw("launch_date", 56, 66),
    raw("launch_site", 69, 73),
    raw("decay_date", 75, 85),
    raw("orbit_period_minutes", 87, 94),
    raw("inclination_deg", 96, 101),
    raw("apogee", 103, 109),
    raw("perigee", 111, 117),
    raw("radar_crosssec", 119, 127),
    raw("orbit_status_code", 129, 132),
];

/// Slice one catalog line into its 16 raw fields.
pub fn parse_catalog_line(line: &str) -> RawRow {
    let chars: Vec<char> = line.chars().collect();
    let cells = CATALOG_LAYOUT
        .iter()
        .map(|span| {
            let slice = slice_columns(&chars, span.start, span.end);
            match span.kind {
                FieldKind::Raw => RawCell::Text(slice),
                FieldKind::PresenceFlag => RawCell::Int(i64::from(!slice.is_empty())),
            }
        })
        .collect();
    RawRow::new(cells)
}

fn slice_columns(chars: &[char], start: usize, end: usize) -> String {
    let end = end.min(chars.len());
    if start >= end {
        return String::new();
    }
    chars[start..end].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::coerce_cell;
    use crate::schema::CATALOG_COLUMNS;
    use crate::value::Value;
    use chrono::NaiveDate;

    /// Build a line by placing each field at its declared offset.
    fn layout_line(fields: &[(&str, &str)]) -> String {
        let mut line = vec![' '; 132];
        for (name, text) in fields {
            let span = CATALOG_LAYOUT.iter().find(|s| s.name == *name).unwrap();
            for (i, ch) in text.chars().enumerate() {
                assert!(span.start + i < span.end, "{name} overflows its column");
                line[span.start + i] = ch;
            }
        }
        line.into_iter().collect()
    }

    fn iss_line() -> String {
        layout_line(&[
            ("intl_desg", "1998-067A"),
            ("norad_num", "25544"),
            ("multiple_name_flag", "M"),
            ("payload_flag", "*"),
            ("ops_status_code", "+"),
            ("name", "ISS (ZARYA)"),
            ("source", "ISS"),
            ("launch_date", "1998/11/20"),
            ("launch_site", "TYMS"),
            ("orbit_period_minutes", "92.7"),
            ("inclination_deg", "51.6"),
            ("apogee", "421"),
            ("perigee", "408"),
            ("radar_crosssec", "399.0524"),
            ("orbit_status_code", "EA"),
        ])
    }

    #[test]
    fn layout_names_match_schema() {
        let names: Vec<&str> = CATALOG_LAYOUT.iter().map(|s| s.name).collect();
        assert_eq!(names, CATALOG_COLUMNS.to_vec());
    }

    #[test]
    fn spans_are_ordered_and_disjoint() {
        for pair in CATALOG_LAYOUT.windows(2) {
            assert!(pair[0].start < pair[0].end);
            assert!(pair[0].end <= pair[1].start, "{} overlaps {}", pair[0].name, pair[1].name);
        }
    }

    #[test]
    fn parses_full_line() {
        let row = parse_catalog_line(&iss_line());
        assert_eq!(row.len(), 16);
        let cells = row.cells();
        assert_eq!(cells[0], RawCell::text("1998-067A  "));
        assert_eq!(cells[1], RawCell::text("25544"));
        assert_eq!(cells[2], RawCell::Int(1));
        assert_eq!(cells[3], RawCell::Int(1));
        assert_eq!(cells[4], RawCell::text("+"));

        let typed: Vec<Value> = cells.iter().map(coerce_cell).collect();
        assert_eq!(typed[1], Value::Integer(25544));
        assert_eq!(typed[5], Value::text("ISS (ZARYA)"));
        assert_eq!(
            typed[7],
            Value::Date(NaiveDate::from_ymd_opt(1998, 11, 20).unwrap())
        );
        assert_eq!(typed[8], Value::text("TYMS"));
        assert_eq!(typed[9], Value::Null);
        assert_eq!(typed[10], Value::Float(92.7));
        assert_eq!(typed[12], Value::Integer(421));
        assert_eq!(typed[15], Value::text("EA"));
    }

    #[test]
    fn flags_mark_presence_not_content() {
        // A blank in the flag column still counts as present.
        let line = layout_line(&[("norad_num", "00005")]);
        let row = parse_catalog_line(&line);
        assert_eq!(row.cells()[2], RawCell::Int(1));
        assert_eq!(row.cells()[3], RawCell::Int(1));
    }

    #[test]
    fn line_ending_at_flag_column() {
        // Character at offset 19, nothing at offset 20.
        let line = "1957-001A    00001 M";
        assert_eq!(line.chars().count(), 20);
        let row = parse_catalog_line(line);
        assert_eq!(row.cells()[2], RawCell::Int(1));
        assert_eq!(row.cells()[3], RawCell::Int(0));
        assert_eq!(row.cells()[5], RawCell::text(""));
    }

    #[test]
    fn short_and_empty_lines_do_not_fail() {
        let row = parse_catalog_line("1957-001A");
        assert_eq!(row.len(), 16);
        assert_eq!(row.cells()[0], RawCell::text("1957-001A"));
        assert!(row.cells()[1..]
            .iter()
            .all(|c| *c == RawCell::text("") || *c == RawCell::Int(0)));

        let empty = parse_catalog_line("");
        assert_eq!(empty.len(), 16);
    }

    #[test]
    fn multibyte_characters_count_as_one_column() {
        let line = layout_line(&[("intl_desg", "1960-009A"), ("name", "ÉCHO 1")]);
        let row = parse_catalog_line(&line);
        assert_eq!(coerce_cell(&row.cells()[5]), Value::text("ÉCHO 1"));
    }
}
