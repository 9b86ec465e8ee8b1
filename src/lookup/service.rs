//! Pincode validation and detail lookup.

use tracing::debug;

use super::ShardStore;
use crate::dataset::ValidationIndex;
use crate::error::PincodeError;
use crate::models::{Pincode, PincodeDetail};

/// Answers "does this pincode exist" and "which offices serve it".
#[derive(Debug)]
pub struct LookupService {
    validation: ValidationIndex,
    shards: ShardStore,
}

impl LookupService {
    pub fn new(validation: ValidationIndex, shards: ShardStore) -> Self {
        Self { validation, shards }
    }

    /// True iff the trimmed input is a 6-character pincode present in the
    /// validation index. Never errors.
    pub fn validate(&self, pincode: &str) -> bool {
        self.validation.is_valid(pincode)
    }

    /// Offices for a pincode, in the order stored in its shard.
    pub fn lookup(&self, pincode: &str) -> Result<Vec<PincodeDetail>, PincodeError> {
        let code = Pincode::parse(pincode)?;
        if !self.validation.contains(&code) {
            return Err(PincodeError::InvalidPincode(pincode.to_string()));
        }
        self.lookup_valid(&code)
    }

    /// Lookup for a pincode already known to pass validation.
    pub(crate) fn lookup_valid(&self, code: &Pincode) -> Result<Vec<PincodeDetail>, PincodeError> {
        let shard = self.shards.get(code.prefix()).map_err(|e| {
            debug!(pincode = %code, error = %e, "Detail shard unavailable");
            PincodeError::NotFound(code.to_string())
        })?;

        shard
            .get(code.as_str())
            .cloned()
            .ok_or_else(|| PincodeError::NotFound(code.to_string()))
    }

    pub fn validation(&self) -> &ValidationIndex {
        &self.validation
    }

    pub fn shards(&self) -> &ShardStore {
        &self.shards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DataSource, MemorySource};
    use hashbrown::HashMap;
    use std::sync::Arc;

    fn service(capacity: usize) -> LookupService {
        let mut raw = HashMap::new();
        raw.insert("110".to_string(), vec![1, 2, 3]);
        raw.insert("560".to_string(), vec![1]);
        let (validation, _) = ValidationIndex::from_raw(raw);

        let source: Arc<dyn DataSource> = Arc::new(MemorySource::new().with(
            "details/110.json",
            r#"{
                "110001": [
                    {"office": "Connaught Place SO", "district": "NEW DELHI"},
                    {"office": "New Delhi GPO", "district": "NEW DELHI"}
                ],
                "110002": [{"office": "Indraprastha HO", "district": "CENTRAL DELHI"}]
            }"#,
        ));

        LookupService::new(validation, ShardStore::new(source, "details", capacity))
    }

    #[test]
    fn test_lookup_returns_all_offices_in_order() {
        let service = service(8);
        let details = service.lookup("110001").unwrap();
        let offices: Vec<&str> = details.iter().map(|d| d.office.as_str()).collect();
        assert_eq!(offices, vec!["Connaught Place SO", "New Delhi GPO"]);
        assert!(details.iter().all(|d| d.distance_km.is_none()));
    }

    #[test]
    fn test_lookup_trims_input() {
        let service = service(8);
        let details = service.lookup(" 110002 ").unwrap();
        assert_eq!(details[0].office, "Indraprastha HO");
    }

    #[test]
    fn test_lookup_invalid_before_shard_read() {
        let service = service(8);
        for raw in ["", "11000", "110abc", "999999"] {
            let err = service.lookup(raw).unwrap_err();
            assert!(err.is_invalid(), "{raw:?} gave {err:?}");
        }
        assert_eq!(service.shards().cached(), 0);
    }

    #[test]
    fn test_lookup_not_found_in_shard() {
        let service = service(8);
        assert_eq!(
            service.lookup("110003"),
            Err(PincodeError::NotFound("110003".to_string()))
        );
    }

    #[test]
    fn test_lookup_missing_shard_is_not_found() {
        let service = service(8);
        assert_eq!(
            service.lookup("560001"),
            Err(PincodeError::NotFound("560001".to_string()))
        );
    }

    #[test]
    fn test_lookup_is_idempotent() {
        for capacity in [0, 8] {
            let service = service(capacity);
            let first = service.lookup("110001").unwrap();
            let second = service.lookup("110001").unwrap();
            assert_eq!(first, second);
        }
    }
}
