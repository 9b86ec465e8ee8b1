//! Shape-checked pincode value.

use std::fmt;
use std::str::FromStr;

use crate::error::PincodeError;

/// Number of characters in a pincode.
pub const PINCODE_LEN: usize = 6;

/// Number of leading characters that select a shard.
pub const PREFIX_LEN: usize = 3;

/// Number of trailing digits that name the delivery unit.
pub const SUFFIX_LEN: usize = PINCODE_LEN - PREFIX_LEN;

/// Largest pincode representable as a number.
pub const MAX_PINCODE: u32 = 999_999;

/// A 6-character pincode: a 3-character prefix followed by 3 ASCII digits.
///
/// Only the shape is checked here. Whether the code exists is answered by
/// the validation index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pincode(String);

impl Pincode {
    /// Parse a pincode, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, PincodeError> {
        let code = raw.trim();
        if code.chars().count() != PINCODE_LEN {
            return Err(PincodeError::InvalidPincode(raw.to_string()));
        }

        // ASCII digits are single bytes, so the suffix is the last 3 bytes.
        let suffix = &code.as_bytes()[code.len() - SUFFIX_LEN..];
        if !suffix.iter().all(u8::is_ascii_digit) {
            return Err(PincodeError::InvalidPincode(raw.to_string()));
        }

        Ok(Self(code.to_string()))
    }

    /// Build a pincode from its numeric form, zero-padded to 6 digits.
    pub fn from_number(number: u32) -> Option<Self> {
        if number > MAX_PINCODE {
            return None;
        }
        Some(Self(format!("{:06}", number)))
    }

    /// The 3-character shard prefix (e.g. "110" for "110001")
    pub fn prefix(&self) -> &str {
        &self.0[..self.0.len() - SUFFIX_LEN]
    }

    /// The numeric delivery-unit suffix (e.g. 1 for "110001")
    pub fn suffix(&self) -> u16 {
        self.0.as_bytes()[self.0.len() - SUFFIX_LEN..]
            .iter()
            .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Pincode {
    type Err = PincodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Pincode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
