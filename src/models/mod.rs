//! Core data models for pincode lookups.

pub mod detail;
pub mod pincode;
pub mod point;

pub use detail::PincodeDetail;
pub use pincode::{Pincode, MAX_PINCODE, PINCODE_LEN, PREFIX_LEN, SUFFIX_LEN};
pub use point::GeoPoint;
