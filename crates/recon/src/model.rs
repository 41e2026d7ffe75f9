use satcat_engine::Dataset;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Join misses
// ---------------------------------------------------------------------------

/// Why a registry row was left as loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissReason {
    /// Catalog number is empty or a placeholder.
    MissingKey,
    /// Catalog number is present but not a positive whole number.
    MalformedKey,
    /// Well-formed key with no tracking catalog row.
    NotInCatalog,
}

impl std::fmt::Display for MissReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingKey => write!(f, "missing_key"),
            Self::MalformedKey => write!(f, "malformed_key"),
            Self::NotInCatalog => write!(f, "not_in_catalog"),
        }
    }
}

/// A registry row that kept its own values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinMiss {
    /// 0-based position in the registry dataset.
    pub row: usize,
    /// Catalog number as loaded; `None` when the cell was empty or `N/A`.
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub reason: MissReason,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub registry_rows: usize,
    pub catalog_rows: usize,
    pub matched: usize,
    pub missed: usize,
    pub missing_keys: usize,
    pub malformed_keys: usize,
    pub not_in_catalog: usize,
    /// Catalog rows ignored because an earlier row had the same key.
    pub duplicate_catalog_keys: usize,
    /// Catalog rows whose own catalog number did not normalize.
    pub unkeyed_catalog_rows: usize,
}

/// Output of [`reconcile`](crate::reconcile).
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub dataset: Dataset,
    pub misses: Vec<JoinMiss>,
    pub summary: ReconSummary,
}
