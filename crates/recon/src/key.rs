use std::fmt;

use satcat_engine::Value;
use serde::Serialize;

use crate::model::MissReason;

/// Largest float that still converts to a catalog number exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Canonical catalog number: positive decimal digits, no leading zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CatalogKey(String);

impl CatalogKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a coerced catalog-number cell to its join key.
///
/// Integers and integral floats normalize; everything else is a join miss,
/// reported as [`MissReason::MissingKey`] for nulls and
/// [`MissReason::MalformedKey`] otherwise.
pub fn normalize_key(value: &Value) -> Result<CatalogKey, MissReason> {
    match value {
        Value::Null => Err(MissReason::MissingKey),
        Value::Integer(n) if *n > 0 => Ok(CatalogKey(n.to_string())),
        Value::Float(x) if x.is_finite() && x.fract() == 0.0 && *x > 0.0 && *x <= MAX_EXACT_FLOAT => {
            Ok(CatalogKey((*x as i64).to_string()))
        }
        _ => Err(MissReason::MalformedKey),
    }
}
