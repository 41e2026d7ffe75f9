use std::collections::HashMap;

use satcat_engine::schema::CATALOG_KEY_COLUMN;
use satcat_engine::{Dataset, TypedRow};

use crate::error::ReconError;
use crate::key::{normalize_key, CatalogKey};

/// Tracking catalog rows by catalog number. First row wins on duplicates.
#[derive(Debug)]
pub struct CatalogIndex<'a> {
    catalog: &'a Dataset,
    by_key: HashMap<CatalogKey, usize>,
    duplicates: usize,
    unkeyed: usize,
}

impl<'a> CatalogIndex<'a> {
    pub fn build(catalog: &'a Dataset) -> Result<Self, ReconError> {
        let key_idx = catalog.schema().require(CATALOG_KEY_COLUMN)?;

        let mut by_key = HashMap::with_capacity(catalog.len());
        let mut duplicates = 0;
        let mut unkeyed = 0;

        for (i, row) in catalog.rows().iter().enumerate() {
            let Some(value) = row.get(key_idx) else {
                unkeyed += 1;
                continue;
            };
            match normalize_key(value) {
                Ok(key) => {
                    if by_key.contains_key(&key) {
                        log::debug!("catalog row {i}: duplicate catalog number {key}, keeping first");
                        duplicates += 1;
                    } else {
                        by_key.insert(key, i);
                    }
                }
                Err(reason) => {
                    log::debug!("catalog row {i}: unusable catalog number '{value}' ({reason})");
                    unkeyed += 1;
                }
            }
        }

        if duplicates > 0 {
            log::info!("{duplicates} tracking catalog rows share a catalog number with an earlier row");
        }

        Ok(Self {
            catalog,
            by_key,
            duplicates,
            unkeyed,
        })
    }

    pub fn lookup(&self, key: &CatalogKey) -> Option<&'a TypedRow> {
        let catalog: &'a Dataset = self.catalog;
        self.by_key.get(key).and_then(|&i| catalog.rows().get(i))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn catalog_rows(&self) -> usize {
        self.catalog.len()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn unkeyed(&self) -> usize {
        self.unkeyed
    }
}
