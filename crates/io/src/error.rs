use std::path::PathBuf;

use satcat_engine::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("fetching {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {url} failed: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("registry: {0}")]
    Csv(#[from] csv::Error),

    #[error("registry header has {found} columns, expected at least {expected}")]
    RegistryHeader { expected: usize, found: usize },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("cannot open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl IoError {
    /// Column-count mismatches, as opposed to unreadable or unreachable input.
    pub fn is_schema_violation(&self) -> bool {
        matches!(self, Self::RegistryHeader { .. } | Self::Schema(_))
    }
}
