use thiserror::Error;

/// A row or column that does not fit its table's declared schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("table '{table}', row {row}: expected {expected} columns, found {found}")]
    RowWidth {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("table '{table}': unknown column '{column}'")]
    UnknownColumn { table: String, column: String },
}
