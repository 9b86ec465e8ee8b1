//! Reference data: resource access, parsing and the in-memory structures.

mod geo_table;
mod loader;
mod source;
mod validation;

pub use geo_table::{GeoEntry, GeoTable};
pub use loader::{Dataset, IssueKind, LoadIssue, LoadReport, Resource};
pub use source::{DataSource, DirSource, MemorySource};
pub use validation::ValidationIndex;

pub(crate) use source::read_json;
