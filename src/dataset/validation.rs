//! Prefix → suffix set index answering "does this pincode exist".

use hashbrown::{HashMap, HashSet};

use crate::models::Pincode;

/// Valid pincodes, grouped by their 3-character prefix.
#[derive(Debug, Clone, Default)]
pub struct ValidationIndex {
    prefixes: HashMap<String, HashSet<u16>>,
}

impl ValidationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the raw `prefix -> [suffix, ...]` mapping.
    ///
    /// Suffixes outside `0..=999` can never be produced by a 3-digit suffix
    /// and are dropped. Returns the index and the number of dropped values.
    pub fn from_raw(raw: HashMap<String, Vec<i64>>) -> (Self, usize) {
        let mut dropped = 0;
        let prefixes = raw
            .into_iter()
            .map(|(prefix, suffixes)| {
                let set: HashSet<u16> = suffixes
                    .into_iter()
                    .filter_map(|s| match u16::try_from(s) {
                        Ok(s) if s <= 999 => Some(s),
                        _ => {
                            dropped += 1;
                            None
                        }
                    })
                    .collect();
                (prefix, set)
            })
            .collect();

        (Self { prefixes }, dropped)
    }

    /// Check whether a shape-checked pincode is present
    pub fn contains(&self, pincode: &Pincode) -> bool {
        self.prefixes
            .get(pincode.prefix())
            .is_some_and(|suffixes| suffixes.contains(&pincode.suffix()))
    }

    /// Check a raw string; any shape problem yields `false`
    pub fn is_valid(&self, raw: &str) -> bool {
        Pincode::parse(raw).is_ok_and(|pincode| self.contains(&pincode))
    }

    /// Number of distinct prefixes
    pub fn prefix_count(&self) -> usize {
        self.prefixes.len()
    }

    /// Total number of valid pincodes
    pub fn len(&self) -> usize {
        self.prefixes.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
