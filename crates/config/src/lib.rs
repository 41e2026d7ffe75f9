// Configuration loading

pub mod error;
pub mod pipeline;

pub use error::ConfigError;
pub use pipeline::{
    CatalogConfig, DatabaseConfig, PipelineConfig, RegistryConfig,
    DEFAULT_BATCH_SIZE, DEFAULT_CATALOG_SOURCE, DEFAULT_DATABASE, DEFAULT_REGISTRY_SOURCE,
};
