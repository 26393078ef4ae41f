//! Turns raw tabular records into a [`Catalog`](crate::item::Catalog).
//!
//! This layer sits in front of the search: it reads records, drops unusable rows, narrows the
//! set by category and deduplicates by name. The engine never calls into it.

/// Category-based pruning of records.
pub mod category;
/// CSV record reading, cleaning and catalog building.
pub mod records;

pub use category::CategoryFilter;
pub use records::{Columns, Record, into_catalog, read_records, remove_empty};
