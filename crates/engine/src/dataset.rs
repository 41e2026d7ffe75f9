use crate::cell::RawCell;
use crate::coerce::{coerce_cell, coerce_value};
use crate::error::SchemaError;
use crate::fingerprint::fingerprint;
use crate::schema::TableSchema;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// Positional, untyped cells of one source record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    cells: Vec<RawCell>,
}

impl RawRow {
    pub fn new(cells: Vec<RawCell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[RawCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Fingerprint of the cells as loaded, before any coercion.
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.cells)
    }
}

impl FromIterator<RawCell> for RawRow {
    fn from_iter<T: IntoIterator<Item = RawCell>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Typed rows
// ---------------------------------------------------------------------------

/// Coerced values of one row plus the fingerprint stored alongside them.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedRow {
    values: Vec<Value>,
    fingerprint: String,
}

impl TypedRow {
    /// Coerce every cell. The fingerprint covers the raw cells, so it
    /// reflects the source record rather than its typed form.
    pub fn from_raw(raw: &RawRow) -> Self {
        Self {
            values: raw.cells.iter().map(coerce_cell).collect(),
            fingerprint: raw.fingerprint(),
        }
    }

    /// Re-coerce `values` and fingerprint the result.
    pub fn from_values(values: Vec<Value>) -> Self {
        let values: Vec<Value> = values.iter().map(coerce_value).collect();
        let fingerprint = fingerprint(&values);
        Self { values, fingerprint }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Values followed by the fingerprint, in persisted column order.
    pub fn to_tuple(&self) -> Vec<Value> {
        let mut tuple = Vec::with_capacity(self.values.len() + 1);
        tuple.extend(self.values.iter().cloned());
        tuple.push(Value::Text(self.fingerprint.clone()));
        tuple
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Ordered rows of one table. Every row has exactly the schema's width.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: &'static TableSchema,
    rows: Vec<TypedRow>,
}

impl Dataset {
    pub fn new(schema: &'static TableSchema) -> Self {
        Self { schema, rows: Vec::new() }
    }

    /// Coerce and fingerprint raw rows. A row of the wrong width is a schema
    /// violation for the whole dataset.
    pub fn from_raw_rows<I>(schema: &'static TableSchema, raws: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut dataset = Self::new(schema);
        for raw in raws {
            dataset.check_width(raw.len())?;
            dataset.rows.push(TypedRow::from_raw(&raw));
        }
        Ok(dataset)
    }

    pub fn push(&mut self, row: TypedRow) -> Result<(), SchemaError> {
        self.check_width(row.len())?;
        self.rows.push(row);
        Ok(())
    }

    fn check_width(&self, found: usize) -> Result<(), SchemaError> {
        if found != self.schema.len() {
            return Err(SchemaError::RowWidth {
                table: self.schema.name.to_string(),
                row: self.rows.len(),
                expected: self.schema.len(),
                found,
            });
        }
        Ok(())
    }

    pub fn schema(&self) -> &'static TableSchema {
        self.schema
    }

    pub fn rows(&self) -> &[TypedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<TypedRow> {
        self.rows
    }

    /// Value of `column` in row `row`.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.schema.index_of(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Split into sink batches of at most `size` rows (a size of 0 is
    /// treated as 1).
    pub fn batches(&self, size: usize) -> impl Iterator<Item = Batch<'_>> {
        let schema = self.schema;
        self.rows
            .chunks(size.max(1))
            .map(move |rows| Batch { schema, rows })
    }
}

/// A slice of typed rows on its way to a sink.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    pub schema: &'static TableSchema,
    pub rows: &'a [TypedRow],
}

impl<'a> Batch<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Persisted column names, fingerprint last.
    pub fn columns(&self) -> Vec<&'static str> {
        self.schema.stored_columns()
    }

    /// Row tuples in persisted column order.
    pub fn tuples(&self) -> impl Iterator<Item = Vec<Value>> + 'a {
        let rows = self.rows;
        rows.iter().map(TypedRow::to_tuple)
    }
}
