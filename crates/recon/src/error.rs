use std::error::Error as StdError;

use satcat_engine::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconError {
    /// A dataset lacks a column the join or an override needs.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Boxed collaborator error. Loaders and sinks keep their own error types.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("load failed: {0}")]
    Load(#[source] BoxError),
    #[error("sink failed on table '{table}': {source}")]
    Sink {
        table: String,
        #[source]
        source: BoxError,
    },
    #[error("schema violation: {0}")]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Recon(#[from] ReconError),
}
