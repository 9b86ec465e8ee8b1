//! Error types returned by the lookup and nearby-search operations.

use std::path::PathBuf;

/// Error returned to callers of [`crate::PincodeDirectory`].
///
/// `InvalidPincode` and `NotFound` are different situations: the first is a
/// caller mistake, the second only means the dataset has no record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PincodeError {
    /// Malformed pincode, or a well-formed code that the validation index rejects.
    #[error("invalid pincode: {0:?}")]
    InvalidPincode(String),

    /// Valid pincode without a detail record, or its shard could not be read.
    #[error("pincode not found: {0}")]
    NotFound(String),
}

impl PincodeError {
    /// True for a pincode the caller got wrong
    pub fn is_invalid(&self) -> bool {
        matches!(self, PincodeError::InvalidPincode(_))
    }

    /// True when the pincode is valid but has no detail record
    pub fn is_not_found(&self) -> bool {
        matches!(self, PincodeError::NotFound(_))
    }
}

/// Error reading or decoding a bundled resource.
///
/// Never escapes the crate's public operations: the loader turns it into a
/// [`crate::dataset::LoadIssue`] and lookups turn it into
/// [`PincodeError::NotFound`].
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("resource not found: {0}")]
    Missing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
