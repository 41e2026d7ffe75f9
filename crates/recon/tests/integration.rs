use std::collections::HashMap;
use std::convert::Infallible;

use chrono::NaiveDate;
use satcat_engine::fixed_width::CATALOG_LAYOUT;
use satcat_engine::schema::{TableSchema, REGISTRY, TRACKING_CATALOG};
use satcat_engine::{Batch, RawCell, RawRow, Value};
use satcat_recon::{run, DatasetLoader, MissReason, RunOptions, Sink, FIELD_OVERRIDES};

struct FixtureLoader {
    registry: Vec<RawRow>,
    lines: Vec<String>,
}

impl DatasetLoader for FixtureLoader {
    type Error = Infallible;

    fn load_registry(&mut self) -> Result<Vec<RawRow>, Infallible> {
        Ok(self.registry.clone())
    }

    fn load_catalog_lines(&mut self) -> Result<Vec<String>, Infallible> {
        Ok(self.lines.clone())
    }
}

#[derive(Default)]
struct RecordingSink {
    tables: HashMap<String, Vec<Vec<Value>>>,
}

impl Sink for RecordingSink {
    type Error = Infallible;

    fn create_table(&mut self, table: &str, _schema: &TableSchema) -> Result<(), Infallible> {
        self.tables.entry(table.to_string()).or_default();
        Ok(())
    }

    fn write_batch(&mut self, table: &str, batch: &Batch<'_>) -> Result<usize, Infallible> {
        self.tables
            .entry(table.to_string())
            .or_default()
            .extend(batch.tuples());
        Ok(batch.len())
    }
}

/// Lay `fields` out at their catalog offsets in a 132-column line.
fn catalog_line(fields: &[(&str, &str)]) -> String {
    let mut line = vec![' '; 132];
    for (name, value) in fields {
        let span = CATALOG_LAYOUT
            .iter()
            .find(|s| s.name == *name)
            .unwrap_or_else(|| panic!("no catalog field {name}"));
        assert!(value.chars().count() <= span.end - span.start, "{name} too wide");
        for (i, c) in value.chars().enumerate() {
            line[span.start + i] = c;
        }
    }
    line.into_iter().collect()
}

fn registry_row(fields: &[(&str, &str)]) -> RawRow {
    let mut cells = vec![RawCell::Missing; REGISTRY.len()];
    for (name, value) in fields {
        cells[REGISTRY.index_of(name).unwrap()] = RawCell::from_field(value);
    }
    RawRow::new(cells)
}

fn fixture() -> FixtureLoader {
    FixtureLoader {
        registry: vec![
            registry_row(&[
                ("name", "International Space Station"),
                ("country_owner", "Multinational"),
                ("purpose", "Space Science"),
                ("perigee_km", "401"),
                ("apogee_km", "422"),
                ("inclination_degrees", "51.6"),
                ("period_minutes", "92.5"),
                ("launch_mass_kg", "417,289"),
                ("launch_date", "11/20/98"),
                ("launch_site", "Baikonur Cosmodrome"),
                ("international_designator", "1998-067A"),
                ("norad_number", "25544"),
            ]),
            registry_row(&[
                ("name", "Unlisted Demo Sat"),
                ("country_owner", "USA"),
                ("perigee_km", "500"),
                ("launch_date", "4/1/2019"),
                ("norad_number", "99999"),
            ]),
        ],
        lines: vec![catalog_line(&[
            ("intl_desg", "1998-067A"),
            ("norad_num", "25544"),
            ("multiple_name_flag", "M"),
            ("payload_flag", "*"),
            ("ops_status_code", "+"),
            ("name", "ISS (ZARYA)"),
            ("source", "ISS"),
            ("launch_date", "1998-11-20"),
            ("launch_site", "TYMS"),
            ("orbit_period_minutes", "92.77"),
            ("inclination_deg", "51.64"),
            ("apogee", "421"),
            ("perigee", "408"),
            ("radar_crosssec", "402.5700"),
        ])],
    }
}

#[test]
fn end_to_end_one_match_one_miss() {
    let mut loader = fixture();
    let mut sink = RecordingSink::default();
    let report = run(&mut loader, &mut sink, &RunOptions::default()).unwrap();

    assert_eq!(report.registry_rows, 2);
    assert_eq!(report.catalog_rows, 1);
    assert_eq!(report.reconciled_rows, 2);
    assert_eq!(report.summary.matched, 1);
    assert_eq!(report.summary.missed, 1);

    assert_eq!(report.misses.len(), 1);
    assert_eq!(report.misses[0].row, 1);
    assert_eq!(report.misses[0].key.as_deref(), Some("99999"));
    assert_eq!(report.misses[0].reason, MissReason::NotInCatalog);

    let raw = &sink.tables["ucs_satdb"];
    let fixed = &sink.tables["ucs_satdb_fixed"];
    assert_eq!(raw.len(), 2);
    assert_eq!(fixed.len(), 2);

    let cat = &sink.tables["celestrak_satcat"][0];
    for o in FIELD_OVERRIDES {
        let r = REGISTRY.index_of(o.registry).unwrap();
        let c = TRACKING_CATALOG.index_of(o.catalog).unwrap();
        assert_eq!(fixed[0][r], cat[c], "{} should come from the catalog", o.registry);
    }
    assert_eq!(fixed[0][0], Value::text("ISS (ZARYA)"));
    assert_eq!(fixed[0][REGISTRY.index_of("launch_mass_kg").unwrap()], Value::Integer(417_289));
    assert_eq!(fixed[0][REGISTRY.index_of("purpose").unwrap()], Value::text("Space Science"));

    // Unmatched row keeps its values; only the fingerprint column is recomputed.
    let width = REGISTRY.len();
    assert_eq!(fixed[1][..width], raw[1][..width]);
}

#[test]
fn catalog_table_holds_parsed_and_coerced_fields() {
    let mut sink = RecordingSink::default();
    run(&mut fixture(), &mut sink, &RunOptions::default()).unwrap();

    let cat = &sink.tables["celestrak_satcat"][0];
    let get = |name: &str| &cat[TRACKING_CATALOG.index_of(name).unwrap()];

    assert_eq!(get("norad_num"), &Value::Integer(25544));
    assert_eq!(get("multiple_name_flag"), &Value::Integer(1));
    assert_eq!(get("payload_flag"), &Value::Integer(1));
    assert_eq!(get("intl_desg"), &Value::text("1998-067A"));
    assert_eq!(get("inclination_deg"), &Value::Float(51.64));
    // ISO dashes are none of the accepted date layouts.
    assert_eq!(get("launch_date"), &Value::text("1998-11-20"));
    assert_eq!(get("decay_date"), &Value::Null);
    assert_eq!(cat.len(), TRACKING_CATALOG.len() + 1);
}

#[test]
fn fingerprints_differ_between_raw_and_reconciled() {
    let mut sink = RecordingSink::default();
    run(&mut fixture(), &mut sink, &RunOptions::default()).unwrap();

    let fp = |table: &str, row: usize| sink.tables[table][row].last().cloned().unwrap();
    assert_ne!(fp("ucs_satdb", 0), fp("ucs_satdb_fixed", 0));
    match fp("ucs_satdb", 0) {
        Value::Text(hex) => {
            assert_eq!(hex.len(), 64);
            assert!(hex.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
        }
        other => panic!("fingerprint should be text, got {other:?}"),
    }
}

#[test]
fn registry_dates_are_typed() {
    let mut sink = RecordingSink::default();
    run(&mut fixture(), &mut sink, &RunOptions::default()).unwrap();
    let raw = &sink.tables["ucs_satdb"];
    let date_idx = REGISTRY.index_of("launch_date").unwrap();
    assert_eq!(
        raw[0][date_idx],
        Value::Date(NaiveDate::from_ymd_opt(1998, 11, 20).unwrap())
    );
    assert_eq!(
        raw[1][date_idx],
        Value::Date(NaiveDate::from_ymd_opt(2019, 4, 1).unwrap())
    );
}
