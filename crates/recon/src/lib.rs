//! `satcat-recon`: cross-references the registry against the tracking catalog.
//!
//! [`reconcile`] is pure: typed datasets in, a reconciled dataset plus
//! diagnostics out. [`pipeline::run`] drives a whole ingest and reaches
//! loading and persistence only through the [`DatasetLoader`] and [`Sink`]
//! traits.

pub mod engine;
pub mod error;
pub mod evidence;
pub mod key;
pub mod matcher;
pub mod model;
pub mod pipeline;

pub use engine::{reconcile, FieldOverride, FIELD_OVERRIDES};
pub use error::{PipelineError, ReconError};
pub use key::{normalize_key, CatalogKey};
pub use model::{JoinMiss, MissReason, ReconSummary, Reconciliation};
pub use pipeline::{run, DatasetLoader, RunOptions, RunReport, Sink, TableNames};
