//! Pinpoint - Indian postal pincode validation, lookup and search
//!
//! Everything is served from a [`PincodeDirectory`] loaded once from a data
//! directory (or any [`DataSource`]): a prefix index for validation, per-prefix
//! detail shards read on demand, a district name list, and a table of post
//! office coordinates indexed for radius search.

pub mod config;
pub mod dataset;
pub mod directory;
pub mod error;
pub mod lookup;
pub mod models;
pub mod nearby;
pub mod search;

pub use config::DirectoryConfig;
pub use dataset::{DataSource, DirSource, LoadReport, MemorySource};
pub use directory::{DirectoryStats, PincodeDirectory};
pub use error::{DatasetError, PincodeError};
pub use models::{GeoPoint, Pincode, PincodeDetail};
pub use nearby::{haversine_km, DEFAULT_RADIUS_KM};
