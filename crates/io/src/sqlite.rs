// SQLite sink: one table per dataset, append-only

use std::collections::HashMap;
use std::path::Path;

use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use satcat_engine::{Batch, SchemaError, TableSchema, Value};
use satcat_recon::Sink;

use crate::error::IoError;

/// Appends typed batches to SQLite tables.
///
/// Columns are declared without a type so every row keeps the storage class
/// of its own values. Dates are stored as `YYYY-MM-DD` text.
///
/// The stored column count of every table is remembered so a batch of the
/// wrong width is refused before it reaches SQLite.
#[derive(Debug)]
pub struct SqliteSink {
    conn: Connection,
    widths: HashMap<String, usize>,
}

impl SqliteSink {
    pub fn open(path: &Path) -> Result<Self, IoError> {
        let conn = Connection::open(path).map_err(|source| IoError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("opened database {}", path.display());
        Ok(Self::with_connection(conn))
    }

    pub fn in_memory() -> Result<Self, IoError> {
        Ok(Self::with_connection(Connection::open_in_memory()?))
    }

    fn with_connection(conn: Connection) -> Self {
        Self {
            conn,
            widths: HashMap::new(),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Column count of `table` as it exists in the database; 0 if absent.
    fn table_width(&self, table: &str) -> Result<usize, IoError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pragma_table_info(?1)",
            [table],
            |r| r.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn declared_width(&mut self, table: &str) -> Result<usize, IoError> {
        if let Some(&width) = self.widths.get(table) {
            return Ok(width);
        }
        let width = self.table_width(table)?;
        if width > 0 {
            self.widths.insert(table.to_string(), width);
        }
        Ok(width)
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(n) => SqlValue::Integer(*n),
        Value::Float(x) => SqlValue::Real(*x),
        Value::Date(_) => SqlValue::Text(value.to_string()),
        Value::Text(s) => SqlValue::Text(s.clone()),
    }
}

impl Sink for SqliteSink {
    type Error = IoError;

    fn create_table(&mut self, table: &str, schema: &TableSchema) -> Result<(), IoError> {
        let columns = schema
            .stored_columns()
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("CREATE TABLE IF NOT EXISTS {} ({columns})", quote_ident(table));
        self.conn.execute_batch(&sql)?;

        // An existing table keeps whatever columns it was created with.
        let width = self.table_width(table)?;
        if width != schema.stored_columns().len() {
            log::warn!(
                "table '{table}' already exists with {width} columns, {} declares {}",
                schema.name,
                schema.stored_columns().len()
            );
        }
        self.widths.insert(table.to_string(), width);
        Ok(())
    }

    fn write_batch(&mut self, table: &str, batch: &Batch<'_>) -> Result<usize, IoError> {
        if batch.is_empty() {
            return Ok(0);
        }

        let columns = batch.columns();
        let declared = self.declared_width(table)?;
        if declared > 0 && declared != columns.len() {
            return Err(SchemaError::RowWidth {
                table: table.to_string(),
                row: 0,
                expected: declared,
                found: columns.len(),
            }
            .into());
        }

        let names = columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", ");
        let placeholders = (1..=columns.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({names}) VALUES ({placeholders})",
            quote_ident(table)
        );

        // Dropping the transaction on an early return rolls the batch back.
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for (row, tuple) in batch.tuples().enumerate() {
                if tuple.len() != columns.len() {
                    return Err(SchemaError::RowWidth {
                        table: table.to_string(),
                        row,
                        expected: columns.len(),
                        found: tuple.len(),
                    }
                    .into());
                }
                stmt.execute(params_from_iter(tuple.iter().map(to_sql)))?;
            }
        }
        tx.commit()?;
        Ok(batch.len())
    }
}
