// Registry export: tab-delimited, one header row

use satcat_engine::schema::REGISTRY;
use satcat_engine::{RawCell, RawRow};

use crate::error::IoError;

/// Read registry rows from decoded TSV text.
///
/// Columns are taken by position: the first 35 become the registry columns
/// and the rest are dropped. Empty fields are missing cells and short rows
/// are padded with missing cells.
pub fn parse_registry(text: &str) -> Result<Vec<RawRow>, IoError> {
    let width = REGISTRY.len();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let found = reader.headers()?.len();
    if found < width {
        return Err(IoError::RegistryHeader { expected: width, found });
    }
    if found > width {
        log::debug!("registry: dropping {} trailing columns", found - width);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut cells: Vec<RawCell> = record.iter().take(width).map(RawCell::from_field).collect();
        cells.resize(width, RawCell::Missing);
        rows.push(RawRow::new(cells));
    }
    Ok(rows)
}
