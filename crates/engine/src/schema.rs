use crate::error::SchemaError;

/// Name of the audit column appended to every persisted row.
pub const FINGERPRINT_COLUMN: &str = "fingerprint";

/// A table's declared columns, in order.
#[derive(Debug, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSchema {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    /// Like [`index_of`](Self::index_of), but an absent column is an error.
    pub fn require(&self, column: &str) -> Result<usize, SchemaError> {
        self.index_of(column).ok_or_else(|| SchemaError::UnknownColumn {
            table: self.name.to_string(),
            column: column.to_string(),
        })
    }

    /// Declared columns followed by [`FINGERPRINT_COLUMN`], the persisted layout.
    pub fn stored_columns(&self) -> Vec<&'static str> {
        let mut cols = self.columns.to_vec();
        cols.push(FINGERPRINT_COLUMN);
        cols
    }
}

/// Registry export columns. The source file is renamed positionally: only
/// its first 35 columns are kept.
pub const REGISTRY_COLUMNS: [&str; 35] = [
    "name",
    "country_registered",
    "country_owner",
    "owner_operator",
    "users",
    "purpose",
    "purpose_detailed",
    "orbit_class",
    "orbit_type",
    "GEO_longitude",
    "perigee_km",
    "apogee_km",
    "eccentricity",
    "inclination_degrees",
    "period_minutes",
    "launch_mass_kg",
    "dry_mass_kg",
    "power_watts",
    "launch_date",
    "expected_lifetime_years",
    "contractor",
    "contractor_country",
    "launch_site",
    "launch_vehicle",
    "international_designator",
    "norad_number",
    "comments",
    "detailed_comments",
    "source_1",
    "source_2",
    "source_3",
    "source_4",
    "source_5",
    "source_6",
    "source_7",
];

/// Tracking catalog columns, in fixed-width layout order.
pub const CATALOG_COLUMNS: [&str; 16] = [
    "intl_desg",
    "norad_num",
    "multiple_name_flag",
    "payload_flag",
    "ops_status_code",
    "name",
    "source",
    "launch_date",
    "launch_site",
    "decay_date",
    "orbit_period_minutes",
    "inclination_deg",
    "apogee",
    "perigee",
    "radar_crosssec",
    "orbit_status_code",
];

pub const REGISTRY: TableSchema = TableSchema {
    name: "registry",
    columns: &REGISTRY_COLUMNS,
};

pub const TRACKING_CATALOG: TableSchema = TableSchema {
    name: "tracking_catalog",
    columns: &CATALOG_COLUMNS,
};

/// Catalog number column on each side of the join.
pub const REGISTRY_KEY_COLUMN: &str = "norad_number";
pub const CATALOG_KEY_COLUMN: &str = "norad_num";
