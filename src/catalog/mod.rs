//! # Course Catalog
//!
//! The equivalency dataset: record types, where records come from, and the
//! process-scoped loader that owns the in-memory collection.

pub mod errors;
pub mod loader;
pub mod record;
pub mod source;
pub mod workbook;

pub use errors::{CatalogError, CatalogResult};
pub use loader::{CourseSnapshot, DatasetLoader};
pub use record::{CourseField, CourseRecord, Credits};
pub use source::{parse_dataset, CourseSource, FileSource, MemorySource};
