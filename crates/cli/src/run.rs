//! `satcat run` and `satcat validate`.

use std::error::Error as StdError;
use std::path::PathBuf;

use satcat_config::{ConfigError, PipelineConfig};
use satcat_io::{FileLoader, IoError, Source, SqliteSink};
use satcat_recon::{PipelineError, RunOptions, RunReport};

use crate::exit_codes::{EXIT_CONFIG_INVALID, EXIT_ERROR, EXIT_LOAD, EXIT_SCHEMA, EXIT_SINK, EXIT_USAGE};
use crate::CliError;

pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub registry: Option<String>,
    pub catalog: Option<String>,
    pub db: Option<PathBuf>,
    pub json: bool,
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let mut config = PipelineConfig::load_or_default(args.config.as_deref()).map_err(config_err)?;

    // Flags are taken relative to the working directory, not the config file.
    if let Some(registry) = args.registry {
        config.registry.source = registry;
    }
    if let Some(catalog) = args.catalog {
        config.catalog.source = catalog;
    }
    if let Some(db) = args.db {
        config.database.path = db;
    }
    config.validate().map_err(config_err)?;

    let options = RunOptions {
        tables: config.tables.clone(),
        batch_size: config.database.batch_size,
    };

    let mut loader = FileLoader::new(
        Source::parse(&config.registry.source),
        Source::parse(&config.catalog.source),
    )
    .with_catalog_header_lines(config.catalog.header_lines);

    let db_path = &config.database.path;
    log::debug!(
        "run: registry {} catalog {} -> {}",
        config.registry.source,
        config.catalog.source,
        db_path.display()
    );
    let mut sink = SqliteSink::open(db_path).map_err(|e| {
        CliError::new(EXIT_SINK, e.to_string())
            .with_hint("check that the database directory exists and is writable")
    })?;

    let report = satcat_recon::run(&mut loader, &mut sink, &options).map_err(pipeline_err)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{json}");
    }

    print_summary(&report, &db_path.display().to_string());
    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = PipelineConfig::load(&config_path).map_err(config_err)?;
    eprintln!(
        "valid: registry {} -> '{}', catalog {} -> '{}', reconciled -> '{}' in {} (batches of {})",
        config.registry.source,
        config.tables.registry,
        config.catalog.source,
        config.tables.catalog,
        config.tables.reconciled,
        config.database.path.display(),
        config.database.batch_size,
    );
    Ok(())
}

fn print_summary(report: &RunReport, db: &str) {
    let s = &report.summary;
    eprintln!(
        "ingested {} registry rows and {} catalog rows into {db}",
        report.registry_rows, report.catalog_rows,
    );
    eprintln!(
        "reconciled: {} matched, {} unmatched ({} missing keys, {} malformed keys, {} not in catalog)",
        s.matched, s.missed, s.missing_keys, s.malformed_keys, s.not_in_catalog,
    );
    if s.duplicate_catalog_keys > 0 || s.unkeyed_catalog_rows > 0 {
        eprintln!(
            "catalog: {} duplicate keys ignored, {} rows without a usable key",
            s.duplicate_catalog_keys, s.unkeyed_catalog_rows,
        );
    }
}

fn config_err(e: ConfigError) -> CliError {
    match &e {
        ConfigError::Read { .. } => CliError::new(EXIT_USAGE, e.to_string()),
        ConfigError::Parse(_) | ConfigError::Validation(_) => {
            CliError::new(EXIT_CONFIG_INVALID, e.to_string())
        }
    }
}

fn is_schema_violation(source: &(dyn StdError + Send + Sync + 'static)) -> bool {
    source
        .downcast_ref::<IoError>()
        .is_some_and(IoError::is_schema_violation)
}

fn pipeline_err(e: PipelineError) -> CliError {
    let code = match &e {
        PipelineError::Load(source) if is_schema_violation(&**source) => EXIT_SCHEMA,
        PipelineError::Load(_) => EXIT_LOAD,
        PipelineError::Sink { source, .. } if is_schema_violation(&**source) => EXIT_SCHEMA,
        PipelineError::Sink { .. } => EXIT_SINK,
        PipelineError::Schema(_) | PipelineError::Recon(_) => EXIT_SCHEMA,
    };
    let err = CliError::new(code, e.to_string());
    match code {
        EXIT_LOAD => err.with_hint("pass --registry / --catalog to read local copies instead"),
        _ => err,
    }
}
