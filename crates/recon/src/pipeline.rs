//! The ingest run: load, normalize, persist raw tables, reconcile, persist
//! the reconciled table.
//!
//! IO stays behind two collaborator traits. [`DatasetLoader`] supplies raw
//! registry rows and raw catalog lines; [`Sink`] stores typed batches under a
//! table name and computes nothing of its own.

use std::collections::BTreeMap;
use std::error::Error as StdError;

use satcat_engine::schema::{REGISTRY, TRACKING_CATALOG};
use satcat_engine::{parse_catalog_line, Batch, Dataset, RawRow, TableSchema};
use serde::{Deserialize, Serialize};

use crate::engine::reconcile;
use crate::error::PipelineError;
use crate::model::{JoinMiss, ReconSummary};

/// Rows per sink batch when nothing else is configured.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Produces the raw inputs of one run.
pub trait DatasetLoader {
    type Error: StdError + Send + Sync + 'static;

    /// Registry rows, one cell per registry column.
    fn load_registry(&mut self) -> Result<Vec<RawRow>, Self::Error>;

    /// Tracking catalog records, one line each, terminators stripped.
    fn load_catalog_lines(&mut self) -> Result<Vec<String>, Self::Error>;
}

/// Accepts typed row batches keyed by table name.
pub trait Sink {
    type Error: StdError + Send + Sync + 'static;

    /// Make sure `table` exists with `schema`'s stored columns.
    fn create_table(&mut self, table: &str, schema: &TableSchema) -> Result<(), Self::Error>;

    /// Append one batch, returning the number of rows stored.
    fn write_batch(&mut self, table: &str, batch: &Batch<'_>) -> Result<usize, Self::Error>;
}

/// Destination table names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableNames {
    pub registry: String,
    pub catalog: String,
    pub reconciled: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            registry: "ucs_satdb".into(),
            catalog: "celestrak_satcat".into(),
            reconciled: "ucs_satdb_fixed".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub tables: TableNames,
    pub batch_size: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            tables: TableNames::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// What one run did.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub registry_rows: usize,
    pub catalog_rows: usize,
    pub reconciled_rows: usize,
    /// Rows stored per table name.
    pub rows_written: BTreeMap<String, usize>,
    pub summary: ReconSummary,
    pub misses: Vec<JoinMiss>,
}

/// Run the whole pipeline once.
///
/// Fails on the first loader, sink or schema error. Join misses are not
/// errors; they end up in the report.
pub fn run<L, S>(loader: &mut L, sink: &mut S, options: &RunOptions) -> Result<RunReport, PipelineError>
where
    L: DatasetLoader,
    S: Sink,
{
    let tables = &options.tables;

    log::info!("loading registry");
    let raw_registry = loader.load_registry().map_err(load_error)?;
    log::info!("loaded {} registry rows", raw_registry.len());

    log::info!("loading tracking catalog");
    let lines = loader.load_catalog_lines().map_err(load_error)?;
    log::info!("loaded {} tracking catalog lines", lines.len());

    let raw_catalog: Vec<RawRow> = lines.iter().map(String::as_str).map(parse_catalog_line).collect();
    log::info!("parsed {} tracking catalog records", raw_catalog.len());

    let registry = Dataset::from_raw_rows(&REGISTRY, raw_registry)?;
    let catalog = Dataset::from_raw_rows(&TRACKING_CATALOG, raw_catalog)?;
    log::info!(
        "coerced {} registry rows and {} tracking catalog rows",
        registry.len(),
        catalog.len()
    );

    create_table(sink, &tables.registry, &REGISTRY)?;
    create_table(sink, &tables.catalog, &TRACKING_CATALOG)?;
    create_table(sink, &tables.reconciled, &REGISTRY)?;

    let mut rows_written = BTreeMap::new();
    let written = write_dataset(sink, &tables.registry, &registry, options.batch_size)?;
    rows_written.insert(tables.registry.clone(), written);
    let written = write_dataset(sink, &tables.catalog, &catalog, options.batch_size)?;
    rows_written.insert(tables.catalog.clone(), written);

    let registry_rows = registry.len();
    let catalog_rows = catalog.len();

    log::info!("reconciling registry against tracking catalog");
    let result = reconcile(registry, &catalog)?;

    let written = write_dataset(sink, &tables.reconciled, &result.dataset, options.batch_size)?;
    rows_written.insert(tables.reconciled.clone(), written);

    log::info!(
        "run complete: {} matched, {} missed, {} duplicate catalog keys ignored",
        result.summary.matched,
        result.summary.missed,
        result.summary.duplicate_catalog_keys
    );

    Ok(RunReport {
        registry_rows,
        catalog_rows,
        reconciled_rows: result.dataset.len(),
        rows_written,
        summary: result.summary,
        misses: result.misses,
    })
}

fn load_error<E>(e: E) -> PipelineError
where
    E: StdError + Send + Sync + 'static,
{
    PipelineError::Load(Box::new(e))
}

fn sink_error<E>(table: &str, e: E) -> PipelineError
where
    E: StdError + Send + Sync + 'static,
{
    PipelineError::Sink {
        table: table.to_string(),
        source: Box::new(e),
    }
}

fn create_table<S: Sink>(sink: &mut S, table: &str, schema: &TableSchema) -> Result<(), PipelineError> {
    sink.create_table(table, schema)
        .map_err(|e| sink_error(table, e))?;
    log::debug!("table '{table}' ready ({} columns)", schema.len() + 1);
    Ok(())
}

fn write_dataset<S: Sink>(
    sink: &mut S,
    table: &str,
    dataset: &Dataset,
    batch_size: usize,
) -> Result<usize, PipelineError> {
    let mut written = 0;
    for (i, batch) in dataset.batches(batch_size).enumerate() {
        if batch.is_empty() {
            continue;
        }
        written += sink
            .write_batch(table, &batch)
            .map_err(|e| sink_error(table, e))?;
        log::debug!("table '{table}': batch {i} stored {} rows", batch.len());
    }
    log::info!("wrote {written} rows to '{table}'");
    Ok(written)
}
