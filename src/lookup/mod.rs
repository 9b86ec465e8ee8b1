//! Validation and detail lookup.
//!
//! Validation only touches the in-memory index. Details live in per-prefix
//! shards that are read when first needed.

mod service;
mod shard;

pub use service::LookupService;
pub use shard::{Shard, ShardStore};
