//! Spatial index for selecting nearby candidates.

use rstar::primitives::GeomWithData;
use rstar::{RTree, AABB};
use tracing::info;

use super::distance::EARTH_RADIUS_KM;
use crate::dataset::GeoTable;
use crate::models::GeoPoint;

/// [lon, lat] keyed by position in the geo table
type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// Slack added to every box edge, in degrees (about 0.1 m)
const BOX_MARGIN_DEG: f64 = 1e-6;

/// Which geo table rows may lie within a radius
#[derive(Debug, Clone, PartialEq)]
pub enum SearchArea {
    /// Radius too large for a bounding box; check every row
    All,
    /// Union of boxes as `[min_lon, min_lat], [max_lon, max_lat]`
    Boxes(Vec<AABB<[f64; 2]>>),
}

impl SearchArea {
    /// Conservative bounding area for a circle of `radius_km` around `center`.
    ///
    /// Falls back to [`SearchArea::All`] when the circle reaches a pole or
    /// covers half the globe, and splits the box at the antimeridian.
    pub fn around(center: GeoPoint, radius_km: f64) -> Self {
        let angular = radius_km / EARTH_RADIUS_KM;
        if !angular.is_finite() || angular >= std::f64::consts::FRAC_PI_2 {
            return SearchArea::All;
        }

        let d_lat = angular.to_degrees() + BOX_MARGIN_DEG;
        let min_lat = center.lat - d_lat;
        let max_lat = center.lat + d_lat;
        if min_lat <= -90.0 || max_lat >= 90.0 {
            return SearchArea::All;
        }

        let ratio = angular.sin() / center.lat.to_radians().cos();
        if ratio >= 1.0 {
            return SearchArea::All;
        }
        let d_lon = ratio.asin().to_degrees() + BOX_MARGIN_DEG;
        if d_lon >= 180.0 {
            return SearchArea::All;
        }

        let lon = normalize_lon(center.lon);
        let (min_lon, max_lon) = (lon - d_lon, lon + d_lon);

        let boxes = if min_lon < -180.0 {
            vec![
                AABB::from_corners([min_lon + 360.0, min_lat], [180.0, max_lat]),
                AABB::from_corners([-180.0, min_lat], [max_lon, max_lat]),
            ]
        } else if max_lon > 180.0 {
            vec![
                AABB::from_corners([min_lon, min_lat], [180.0, max_lat]),
                AABB::from_corners([-180.0, min_lat], [max_lon - 360.0, max_lat]),
            ]
        } else {
            vec![AABB::from_corners([min_lon, min_lat], [max_lon, max_lat])]
        };

        SearchArea::Boxes(boxes)
    }
}

/// Map a longitude into `[-180, 180)`
fn normalize_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// R-tree over the geo table rows
pub struct OfficeSpatialIndex {
    tree: RTree<IndexedPoint>,
    len: usize,
}

impl OfficeSpatialIndex {
    /// Build spatial index from the geo table
    pub fn build(geo: &GeoTable) -> Self {
        let points: Vec<IndexedPoint> = geo
            .entries()
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                GeomWithData::new([normalize_lon(entry.location.lon), entry.location.lat], idx)
            })
            .collect();
        let len = points.len();

        let tree = RTree::bulk_load(points);
        info!("Spatial index built with {} entries", tree.size());

        Self { tree, len }
    }

    /// Geo table indices that may lie within `radius_km` of `center`,
    /// ascending and without duplicates.
    pub fn candidates(&self, center: GeoPoint, radius_km: f64) -> Vec<usize> {
        let mut found: Vec<usize> = match SearchArea::around(center, radius_km) {
            SearchArea::All => return (0..self.len).collect(),
            SearchArea::Boxes(boxes) => boxes
                .iter()
                .flat_map(|envelope| self.tree.locate_in_envelope(envelope))
                .map(|point| point.data)
                .collect(),
        };

        found.sort_unstable();
        found.dedup();
        found
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl std::fmt::Debug for OfficeSpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfficeSpatialIndex")
            .field("len", &self.len)
            .finish()
    }
}
