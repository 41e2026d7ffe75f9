use crate::matcher::CatalogIndex;
use crate::model::{JoinMiss, MissReason, ReconSummary};

/// Compute summary statistics for one reconciliation pass.
pub fn compute_summary(
    registry_rows: usize,
    index: &CatalogIndex<'_>,
    matched: usize,
    misses: &[JoinMiss],
) -> ReconSummary {
    let mut missing_keys = 0;
    let mut malformed_keys = 0;
    let mut not_in_catalog = 0;

    for miss in misses {
        match miss.reason {
            MissReason::MissingKey => missing_keys += 1,
            MissReason::MalformedKey => malformed_keys += 1,
            MissReason::NotInCatalog => not_in_catalog += 1,
        }
    }

    ReconSummary {
        registry_rows,
        catalog_rows: index.catalog_rows(),
        matched,
        missed: misses.len(),
        missing_keys,
        malformed_keys,
        not_in_catalog,
        duplicate_catalog_keys: index.duplicates(),
        unkeyed_catalog_rows: index.unkeyed(),
    }
}
