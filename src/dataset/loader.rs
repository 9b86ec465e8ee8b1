//! Loads the startup resources into a [`Dataset`].
//!
//! Loading never fails. A resource that is missing or cannot be decoded
//! leaves its structure empty and is recorded in the [`LoadReport`], so the
//! directory keeps answering ("nothing found") on a degraded dataset while
//! callers can still detect the problem.

use hashbrown::HashMap;
use tracing::{info, warn};

use super::source::{read_json, DataSource};
use super::{GeoTable, ValidationIndex};
use crate::config::DirectoryConfig;
use crate::error::DatasetError;

/// Which startup resource an issue refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Validation,
    Districts,
    Geo,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Validation => write!(f, "validation"),
            Resource::Districts => write!(f, "districts"),
            Resource::Geo => write!(f, "geo"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Resource absent; the structure is empty
    Missing,
    /// Resource unreadable or not valid JSON; the structure is empty
    Malformed,
    /// Resource loaded but some rows were discarded
    SkippedRows(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadIssue {
    pub resource: Resource,
    /// Resource name as passed to the data source
    pub name: String,
    pub kind: IssueKind,
    pub message: String,
}

/// Outcome of loading the startup resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub issues: Vec<LoadIssue>,
}

impl LoadReport {
    /// True if any resource came back empty because of an error
    pub fn is_degraded(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.kind, IssueKind::Missing | IssueKind::Malformed))
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issue(&self, resource: Resource) -> Option<&LoadIssue> {
        self.issues.iter().find(|i| i.resource == resource)
    }

    fn record_error(&mut self, resource: Resource, name: &str, err: DatasetError) {
        let kind = match err {
            DatasetError::Missing(_) => IssueKind::Missing,
            DatasetError::Io(_) | DatasetError::Json(_) => IssueKind::Malformed,
        };
        warn!(%resource, resource_name = name, error = %err, "Resource unavailable, continuing with empty data");
        self.issues.push(LoadIssue {
            resource,
            name: name.to_string(),
            kind,
            message: err.to_string(),
        });
    }

    fn record_skipped(&mut self, resource: Resource, name: &str, count: usize, what: &str) {
        if count == 0 {
            return;
        }
        warn!(%resource, resource_name = name, count, "Skipped {}", what);
        self.issues.push(LoadIssue {
            resource,
            name: name.to_string(),
            kind: IssueKind::SkippedRows(count),
            message: format!("skipped {} {}", count, what),
        });
    }
}

/// The reference data held in memory for the life of a directory.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub validation: ValidationIndex,
    /// District names in source order, casing preserved
    pub districts: Vec<String>,
    pub geo: GeoTable,
}

impl Dataset {
    /// Load the validation, districts and geo resources.
    pub fn load(source: &dyn DataSource, config: &DirectoryConfig) -> (Self, LoadReport) {
        info!("Loading pincode dataset from {}", source.describe());

        let mut report = LoadReport::default();
        let mut dataset = Dataset::default();

        let name = config.validation_file.as_str();
        match read_json::<HashMap<String, Vec<i64>>>(source, name) {
            Ok(raw) => {
                let (index, dropped) = ValidationIndex::from_raw(raw);
                report.record_skipped(Resource::Validation, name, dropped, "out-of-range suffixes");
                dataset.validation = index;
            }
            Err(e) => report.record_error(Resource::Validation, name, e),
        }

        let name = config.districts_file.as_str();
        match read_json::<Vec<String>>(source, name) {
            Ok(districts) => dataset.districts = districts,
            Err(e) => report.record_error(Resource::Districts, name, e),
        }

        let name = config.geo_file.as_str();
        match read_json::<Vec<[f64; 3]>>(source, name) {
            Ok(raw) => {
                let (table, skipped) = GeoTable::from_raw(raw);
                report.record_skipped(Resource::Geo, name, skipped, "invalid geo rows");
                dataset.geo = table;
            }
            Err(e) => report.record_error(Resource::Geo, name, e),
        }

        info!(
            prefixes = dataset.validation.prefix_count(),
            pincodes = dataset.validation.len(),
            districts = dataset.districts.len(),
            geo_points = dataset.geo.len(),
            "Loaded pincode dataset"
        );

        (dataset, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MemorySource;

    fn full_source() -> MemorySource {
        MemorySource::new()
            .with("pincodes.compressed.json", r#"{"110": [1, 2], "400": [1]}"#)
            .with("districts.json", r#"["NEW DELHI", "MUMBAI"]"#)
            .with("geo.json", "[[110001, 28.63, 77.21], [400001, 18.93, 72.83]]")
    }

    #[test]
    fn test_load_clean() {
        let (dataset, report) = Dataset::load(&full_source(), &DirectoryConfig::default());
        assert!(report.is_clean());
        assert_eq!(dataset.validation.len(), 3);
        assert_eq!(dataset.districts.len(), 2);
        assert_eq!(dataset.geo.len(), 2);
    }

    #[test]
    fn test_missing_resources_degrade_to_empty() {
        let (dataset, report) = Dataset::load(&MemorySource::new(), &DirectoryConfig::default());
        assert!(report.is_degraded());
        assert_eq!(report.issues.len(), 3);
        assert!(dataset.validation.is_empty());
        assert!(dataset.districts.is_empty());
        assert!(dataset.geo.is_empty());
        assert_eq!(
            report.issue(Resource::Geo).map(|i| i.kind),
            Some(IssueKind::Missing)
        );
    }

    #[test]
    fn test_malformed_resource_only_affects_itself() {
        let source = full_source().with("districts.json", "{not json");
        let (dataset, report) = Dataset::load(&source, &DirectoryConfig::default());

        assert!(report.is_degraded());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(
            report.issue(Resource::Districts).map(|i| i.kind),
            Some(IssueKind::Malformed)
        );
        assert!(dataset.districts.is_empty());
        assert_eq!(dataset.validation.len(), 3);
        assert_eq!(dataset.geo.len(), 2);
    }

    #[test]
    fn test_skipped_rows_are_reported_but_not_degraded() {
        let source = full_source().with(
            "geo.json",
            "[[110001, 28.63, 77.21], [-5, 0, 0], [110002, 128.63, 77.21]]",
        );
        let (dataset, report) = Dataset::load(&source, &DirectoryConfig::default());

        assert!(!report.is_degraded());
        assert_eq!(
            report.issue(Resource::Geo).map(|i| i.kind),
            Some(IssueKind::SkippedRows(2))
        );
        assert_eq!(dataset.geo.len(), 1);
    }

    #[test]
    fn test_custom_resource_names() {
        let source = MemorySource::new().with("extra/districts.json", r#"["PUNE"]"#);
        let config = DirectoryConfig {
            districts_file: "extra/districts.json".to_string(),
            ..DirectoryConfig::default()
        };
        let (dataset, _) = Dataset::load(&source, &config);
        assert_eq!(dataset.districts, vec!["PUNE".to_string()]);
    }
}
