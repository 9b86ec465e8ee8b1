//! The pincode directory: one context object owning all loaded data.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::DirectoryConfig;
use crate::dataset::{DataSource, Dataset, DirSource, LoadReport};
use crate::error::PincodeError;
use crate::lookup::{LookupService, ShardStore};
use crate::models::{Pincode, PincodeDetail};
use crate::nearby::{NearbyService, DEFAULT_RADIUS_KM};
use crate::search::DistrictSearch;

/// Pincode validation, lookup, district search and nearby search over one
/// loaded dataset.
///
/// Construction never fails because of bad data; check
/// [`PincodeDirectory::load_report`] to find out whether anything was missing.
/// All operations take `&self`, so a directory can be shared across threads.
#[derive(Debug)]
pub struct PincodeDirectory {
    lookup: LookupService,
    districts: DistrictSearch,
    nearby: NearbyService,
    report: LoadReport,
}

impl PincodeDirectory {
    /// Load from the directory named in `config.data_dir`
    pub fn open(config: &DirectoryConfig) -> Self {
        Self::from_source(Arc::new(DirSource::new(&config.data_dir)), config)
    }

    /// Load with the default file layout under `data_dir`
    pub fn open_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self::open(&DirectoryConfig::with_data_dir(data_dir))
    }

    /// Read a TOML config file and load the data it points at.
    ///
    /// Only a bad config file is an error; data problems end up in the
    /// load report.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = DirectoryConfig::load_from_file(path)?;
        Ok(Self::open(&config))
    }

    /// Load from any data source
    pub fn from_source(source: Arc<dyn DataSource>, config: &DirectoryConfig) -> Self {
        let (dataset, report) = Dataset::load(source.as_ref(), config);
        let Dataset {
            validation,
            districts,
            geo,
        } = dataset;

        let shards = ShardStore::new(source, &config.details_dir, config.shard_cache_capacity);
        let directory = Self {
            lookup: LookupService::new(validation, shards),
            districts: DistrictSearch::new(districts),
            nearby: NearbyService::new(geo),
            report,
        };

        if directory.report.is_degraded() {
            info!(
                issues = directory.report.issues.len(),
                "Pincode directory ready with degraded data"
            );
        } else {
            info!("Pincode directory ready");
        }

        directory
    }

    /// Whether a pincode exists. Surrounding whitespace is ignored.
    pub fn validate(&self, pincode: &str) -> bool {
        self.lookup.validate(pincode)
    }

    /// [`PincodeDirectory::validate`] for a numeric pincode (zero-padded)
    pub fn validate_number(&self, pincode: u32) -> bool {
        Pincode::from_number(pincode).is_some_and(|code| self.validate(code.as_str()))
    }

    /// All offices for a pincode, in stored order.
    ///
    /// Fails with [`PincodeError::InvalidPincode`] if the pincode does not
    /// validate, and with [`PincodeError::NotFound`] if it has no details.
    pub fn lookup(&self, pincode: &str) -> Result<Vec<PincodeDetail>, PincodeError> {
        self.lookup.lookup(pincode)
    }

    /// [`PincodeDirectory::lookup`] for a numeric pincode (zero-padded)
    pub fn lookup_number(&self, pincode: u32) -> Result<Vec<PincodeDetail>, PincodeError> {
        let code = Pincode::from_number(pincode)
            .ok_or_else(|| PincodeError::InvalidPincode(pincode.to_string()))?;
        self.lookup(code.as_str())
    }

    /// District names containing `query`, ignoring case
    pub fn search_districts(&self, query: &str) -> Vec<String> {
        self.districts.search(query)
    }

    /// District whose name equals `name`, ignoring case
    pub fn find_district(&self, name: &str) -> Option<&str> {
        self.districts.find_exact(name)
    }

    /// Offices within `radius_km` of a point, nearest first, each with
    /// `distance_km` set.
    pub fn find_nearby(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
    ) -> Result<Vec<PincodeDetail>, PincodeError> {
        self.nearby.find_nearby(&self.lookup, lat, lng, radius_km)
    }

    /// [`PincodeDirectory::find_nearby`] with [`DEFAULT_RADIUS_KM`]
    pub fn find_nearby_default(&self, lat: f64, lng: f64) -> Result<Vec<PincodeDetail>, PincodeError> {
        self.find_nearby(lat, lng, DEFAULT_RADIUS_KM)
    }

    /// What went wrong, if anything, while loading the dataset
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    pub fn stats(&self) -> DirectoryStats {
        DirectoryStats {
            prefixes: self.lookup.validation().prefix_count(),
            pincodes: self.lookup.validation().len(),
            districts: self.districts.len(),
            geo_points: self.nearby.geo().len(),
            cached_shards: self.lookup.shards().cached(),
        }
    }
}

/// Sizes of the loaded structures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryStats {
    pub prefixes: usize,
    pub pincodes: usize,
    pub districts: usize,
    pub geo_points: usize,
    pub cached_shards: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MemorySource;

    fn directory(capacity: usize) -> PincodeDirectory {
        let source = MemorySource::new()
            .with("pincodes.compressed.json", r#"{"110": [1, 3]}"#)
            .with("districts.json", r#"["NEW DELHI", "SOUTH DELHI"]"#)
            .with("geo.json", "[[110003, 28.62, 77.22], [110001, 28.6304, 77.2177]]")
            .with(
                "details/110.json",
                r#"{
                    "110001": [{"office": "New Delhi GPO"}],
                    "110003": [{"office": "Lodi Road HO"}]
                }"#,
            );
        let config = DirectoryConfig::default().with_shard_cache_capacity(capacity);
        PincodeDirectory::from_source(Arc::new(source), &config)
    }

    #[test]
    fn test_directory_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PincodeDirectory>();
    }

    #[test]
    fn test_operations() {
        let directory = directory(4);
        assert!(directory.load_report().is_clean());

        assert!(directory.validate("110001"));
        assert!(directory.validate_number(110003));
        assert!(!directory.validate_number(110002));
        assert!(!directory.validate_number(9_999_999));

        assert_eq!(directory.lookup_number(110001).unwrap()[0].office, "New Delhi GPO");
        assert!(directory.lookup_number(9_999_999).unwrap_err().is_invalid());

        assert_eq!(directory.search_districts("delhi").len(), 2);
        assert_eq!(directory.find_district("south delhi"), Some("SOUTH DELHI"));

        let nearby = directory.find_nearby(28.6304, 77.2177, 2.0).unwrap();
        let offices: Vec<&str> = nearby.iter().map(|d| d.office.as_str()).collect();
        assert_eq!(offices, vec!["New Delhi GPO", "Lodi Road HO"]);
    }

    #[test]
    fn test_default_radius() {
        let directory = directory(0);
        let nearby = directory.find_nearby_default(28.6304, 77.2177).unwrap();
        assert_eq!(nearby.len(), 2);
        assert!(nearby.iter().all(|d| d.distance_km.unwrap() <= DEFAULT_RADIUS_KM));
    }

    #[test]
    fn test_stats() {
        let directory = directory(4);
        directory.lookup("110001").unwrap();
        assert_eq!(
            directory.stats(),
            DirectoryStats {
                prefixes: 1,
                pincodes: 2,
                districts: 2,
                geo_points: 2,
                cached_shards: 1,
            }
        );
    }

    #[test]
    fn test_empty_directory_answers_nothing_found() {
        let directory =
            PincodeDirectory::from_source(Arc::new(MemorySource::new()), &DirectoryConfig::default());
        assert!(directory.load_report().is_degraded());
        assert!(!directory.validate("110001"));
        assert!(directory.lookup("110001").unwrap_err().is_invalid());
        assert!(directory.search_districts("delhi").is_empty());
        assert!(directory.find_nearby(28.6304, 77.2177, 50.0).unwrap().is_empty());
    }

    #[test]
    fn test_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("districts.json"), r#"["PUNE"]"#).unwrap();
        let config_path = dir.path().join("pinpoint.toml");
        std::fs::write(
            &config_path,
            format!("data_dir = {:?}\n", dir.path().display().to_string()),
        )
        .unwrap();

        let directory = PincodeDirectory::from_config_file(&config_path).unwrap();
        assert_eq!(directory.search_districts("pu"), vec!["PUNE".to_string()]);
        assert!(directory.load_report().is_degraded());
        assert!(PincodeDirectory::from_config_file(dir.path().join("missing.toml")).is_err());
    }
}
