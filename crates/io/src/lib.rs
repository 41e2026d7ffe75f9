//! `satcat-io`: the collaborators around the pure pipeline.
//!
//! [`FileLoader`] reads the registry export and the tracking catalog from a
//! local path or an `http(s)` URL; [`SqliteSink`] appends typed batches to a
//! SQLite database.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod registry;
pub mod source;
pub mod sqlite;

pub use catalog::catalog_lines;
pub use error::IoError;
pub use loader::FileLoader;
pub use registry::parse_registry;
pub use source::{decode_text, Source};
pub use sqlite::SqliteSink;
