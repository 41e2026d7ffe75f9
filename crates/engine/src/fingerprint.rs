use std::fmt::{Display, Write};

use sha2::{Digest, Sha256};

/// Length of a fingerprint in hex characters.
pub const FINGERPRINT_LEN: usize = 64;

/// SHA-256 over the concatenated string forms of `fields`, as lowercase hex.
///
/// Fields are joined with no separator, in the order given. Callers pass
/// values in declared column order; `None` stands in for nulls through the
/// `Display` impls of [`RawCell`](crate::RawCell) and [`Value`](crate::Value).
pub fn fingerprint<I>(fields: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut canonical = String::new();
    for field in fields {
        // Writing into a String cannot fail.
        let _ = write!(canonical, "{field}");
    }
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}
