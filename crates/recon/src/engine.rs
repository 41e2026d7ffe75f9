use satcat_engine::schema::{TableSchema, REGISTRY_KEY_COLUMN};
use satcat_engine::{Dataset, TypedRow, Value};

use crate::error::ReconError;
use crate::evidence::compute_summary;
use crate::key::normalize_key;
use crate::matcher::CatalogIndex;
use crate::model::{JoinMiss, MissReason, Reconciliation};

/// A registry column that takes the tracking catalog's value on a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOverride {
    pub registry: &'static str,
    pub catalog: &'static str,
}

const fn field(registry: &'static str, catalog: &'static str) -> FieldOverride {
    FieldOverride { registry, catalog }
}

/// The only registry fields a catalog match may change.
pub const FIELD_OVERRIDES: [FieldOverride; 8] = [
    field("name", "name"),
    field("perigee_km", "perigee"),
    field("apogee_km", "apogee"),
    field("inclination_degrees", "inclination_deg"),
    field("period_minutes", "orbit_period_minutes"),
    field("launch_date", "launch_date"),
    field("launch_site", "launch_site"),
    field("international_designator", "intl_desg"),
];

/// Column positions resolved once per pass.
struct OverridePlan {
    key_idx: usize,
    name_idx: usize,
    /// (registry index, catalog index)
    pairs: Vec<(usize, usize)>,
}

impl OverridePlan {
    fn resolve(registry: &TableSchema, catalog: &TableSchema) -> Result<Self, ReconError> {
        let pairs = FIELD_OVERRIDES
            .iter()
            .map(|o| Ok((registry.require(o.registry)?, catalog.require(o.catalog)?)))
            .collect::<Result<Vec<_>, ReconError>>()?;
        Ok(Self {
            key_idx: registry.require(REGISTRY_KEY_COLUMN)?,
            name_idx: registry.require("name")?,
            pairs,
        })
    }
}

/// Reconcile the registry against the tracking catalog.
///
/// Consumes `registry` and builds a new dataset in the same row order. A row
/// whose catalog number matches a catalog row gets the [`FIELD_OVERRIDES`]
/// applied; any other row keeps its values and yields one [`JoinMiss`]. Every
/// output row is re-coerced and re-fingerprinted.
pub fn reconcile(registry: Dataset, catalog: &Dataset) -> Result<Reconciliation, ReconError> {
    let schema = registry.schema();
    let plan = OverridePlan::resolve(schema, catalog.schema())?;
    let index = CatalogIndex::build(catalog)?;

    let registry_rows = registry.len();
    let mut reconciled = Dataset::new(schema);
    let mut misses = Vec::new();
    let mut matched = 0;

    for (row_idx, row) in registry.into_rows().into_iter().enumerate() {
        let key_value = row.get(plan.key_idx).unwrap_or(&Value::Null);
        let hit = normalize_key(key_value).and_then(|key| {
            index.lookup(&key).ok_or(MissReason::NotInCatalog)
        });

        let values = match hit {
            Ok(catalog_row) => {
                matched += 1;
                let mut values = row.into_values();
                for &(r, c) in &plan.pairs {
                    values[r] = catalog_row.get(c).cloned().unwrap_or_default();
                }
                values
            }
            Err(reason) => {
                let name = row.get(plan.name_idx).and_then(Value::as_str).map(str::to_string);
                let key = (!key_value.is_null()).then(|| key_value.to_string());
                log::warn!(
                    "registry row {row_idx}: satellite {} with catalog number '{}' not matched ({reason}); keeping registry data",
                    name.as_deref().unwrap_or("<unnamed>"),
                    key.as_deref().unwrap_or(""),
                );
                misses.push(JoinMiss {
                    row: row_idx,
                    key,
                    name,
                    reason,
                });
                row.into_values()
            }
        };
        reconciled.push(TypedRow::from_values(values))?;
    }

    let summary = compute_summary(registry_rows, &index, matched, &misses);
    log::info!(
        "reconciled {} registry rows: {} matched, {} kept registry data",
        summary.registry_rows,
        summary.matched,
        summary.missed
    );

    Ok(Reconciliation {
        dataset: reconciled,
        misses,
        summary,
    })
}
