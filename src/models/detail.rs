//! Post office record stored in the detail shards.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Details of a single post office.
///
/// A pincode can be served by several offices, so lookups return a list of
/// these in shard order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PincodeDetail {
    /// Office name (e.g. "Connaught Place SO")
    pub office: String,

    /// Office classification code (HO, SO, BO, ...)
    #[serde(rename = "type")]
    pub office_type: String,

    /// Delivery status ("Delivery" / "Non-Delivery")
    pub delivery: String,

    pub division: String,
    pub region: String,
    pub circle: String,
    pub taluk: String,
    pub district: String,
    pub state: String,

    /// Latitude as stored in the source data
    pub lat: String,

    /// Longitude as stored in the source data
    pub lng: String,

    /// Distance from the query point, only set by nearby search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl PincodeDetail {
    /// Parse the stored lat/lng strings into a point.
    ///
    /// Returns `None` when either value is blank or not a number.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        let lat = self.lat.trim().parse::<f64>().ok()?;
        let lon = self.lng.trim().parse::<f64>().ok()?;
        let point = GeoPoint::new(lat, lon);
        point.is_finite().then_some(point)
    }
}
