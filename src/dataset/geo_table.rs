//! Post office coordinates used by the nearby search.

use crate::models::{GeoPoint, Pincode, MAX_PINCODE};

/// One post office location.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoEntry {
    /// Zero-padded pincode
    pub pincode: Pincode,
    pub location: GeoPoint,
}

/// Post office locations in source order.
#[derive(Debug, Clone, Default)]
pub struct GeoTable {
    entries: Vec<GeoEntry>,
}

impl GeoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the raw `[pincode, lat, lng]` triples.
    ///
    /// Rows with a pincode outside `0..=999_999`, non-finite coordinates or a
    /// latitude outside `-90..=90` are skipped. Longitudes may be any finite
    /// value. Returns the table and the number of skipped rows.
    pub fn from_raw(raw: Vec<[f64; 3]>) -> (Self, usize) {
        let total = raw.len();
        let entries: Vec<GeoEntry> = raw
            .into_iter()
            .filter_map(|[number, lat, lon]| {
                if !(0.0..=f64::from(MAX_PINCODE)).contains(&number) {
                    return None;
                }
                let location = GeoPoint::new(lat, lon);
                if !location.is_finite() || !(-90.0..=90.0).contains(&lat) {
                    return None;
                }
                Some(GeoEntry {
                    pincode: Pincode::from_number(number as u32)?,
                    location,
                })
            })
            .collect();

        let skipped = total - entries.len();
        (Self { entries }, skipped)
    }

    pub fn get(&self, idx: usize) -> Option<&GeoEntry> {
        self.entries.get(idx)
    }

    pub fn entries(&self) -> &[GeoEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
