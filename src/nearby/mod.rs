//! Nearby post office search.
//!
//! Candidates come from an R-tree bounding-box query, are filtered by exact
//! haversine distance, ranked, and then enriched with their office details.

mod distance;
mod index;
mod service;

pub use distance::{haversine_km, round_distance, EARTH_RADIUS_KM};
pub use index::{OfficeSpatialIndex, SearchArea};
pub use service::{NearbyCandidate, NearbyService, DEFAULT_RADIUS_KM};
