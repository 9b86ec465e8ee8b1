//! Radius search over post office locations.

use tracing::debug;

use super::distance::{haversine_km, round_distance};
use super::OfficeSpatialIndex;
use crate::dataset::GeoTable;
use crate::error::PincodeError;
use crate::lookup::LookupService;
use crate::models::{GeoPoint, Pincode, PincodeDetail};

/// Default search radius in kilometres
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// A geo table row inside the search radius
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyCandidate {
    /// Position in the geo table, breaks distance ties
    pub idx: usize,
    pub pincode: Pincode,
    /// Distance rounded to 2 decimals
    pub distance_km: f64,
}

/// Finds post offices around a point
#[derive(Debug)]
pub struct NearbyService {
    geo: GeoTable,
    index: OfficeSpatialIndex,
}

impl NearbyService {
    pub fn new(geo: GeoTable) -> Self {
        let index = OfficeSpatialIndex::build(&geo);
        Self { geo, index }
    }

    /// Geo table rows within `radius_km` of `center`, nearest first.
    ///
    /// Membership uses the exact distance; ranking uses the rounded distance
    /// with table order breaking ties.
    pub fn candidates(&self, center: GeoPoint, radius_km: f64) -> Vec<NearbyCandidate> {
        if radius_km.is_nan() || radius_km < 0.0 {
            return Vec::new();
        }

        let mut candidates: Vec<NearbyCandidate> = self
            .index
            .candidates(center, radius_km)
            .into_iter()
            .filter_map(|idx| {
                let entry = self.geo.get(idx)?;
                let distance = haversine_km(center, entry.location);
                (distance <= radius_km).then(|| NearbyCandidate {
                    idx,
                    pincode: entry.pincode.clone(),
                    distance_km: round_distance(distance),
                })
            })
            .collect();

        candidates.sort_by(|a, b| {
            a.distance_km
                .total_cmp(&b.distance_km)
                .then(a.idx.cmp(&b.idx))
        });
        candidates
    }

    /// Offices within `radius_km` of (`lat`, `lng`), each stamped with its
    /// rounded distance.
    ///
    /// Candidates whose lookup fails are left out. A non-finite centre or a
    /// NaN radius matches nothing.
    pub fn find_nearby(
        &self,
        lookup: &LookupService,
        lat: f64,
        lng: f64,
        radius_km: f64,
    ) -> Result<Vec<PincodeDetail>, PincodeError> {
        let center = GeoPoint::new(lat, lng);
        if !center.is_finite() || radius_km.is_nan() {
            debug!(lat, lng, radius_km, "Non-finite nearby query, nothing can match");
            return Ok(Vec::new());
        }

        let candidates = self.candidates(center, radius_km);
        debug!(
            "Nearby search at {} within {} km: {} candidates",
            center,
            radius_km,
            candidates.len()
        );

        let mut results = Vec::new();
        for candidate in candidates {
            match lookup.lookup(candidate.pincode.as_str()) {
                Ok(details) => {
                    results.extend(details.into_iter().map(|mut detail| {
                        detail.distance_km = Some(candidate.distance_km);
                        detail
                    }));
                }
                Err(e) => {
                    debug!(pincode = %candidate.pincode, error = %e, "Skipping nearby candidate");
                }
            }
        }

        Ok(results)
    }

    pub fn geo(&self) -> &GeoTable {
        &self.geo
    }

    /// Get the spatial index (for stats/debugging)
    pub fn index(&self) -> &OfficeSpatialIndex {
        &self.index
    }
}
