//! `satcat-engine`: typed values and row plumbing for the satellite catalogs.
//!
//! Everything in this crate is pure and does no IO or logging.
//! Loaders hand over [`RawRow`]s, [`coerce`] turns cells into [`Value`]s and
//! [`Dataset`] keeps the rows of one table in declared column order.

pub mod cell;
pub mod coerce;
pub mod dataset;
pub mod error;
pub mod fingerprint;
pub mod fixed_width;
pub mod schema;
pub mod value;

pub use cell::RawCell;
pub use coerce::{coerce, coerce_cell, coerce_value};
pub use dataset::{Batch, Dataset, RawRow, TypedRow};
pub use error::SchemaError;
pub use fingerprint::fingerprint;
pub use fixed_width::parse_catalog_line;
pub use schema::TableSchema;
pub use value::Value;
