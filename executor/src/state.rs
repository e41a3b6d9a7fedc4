//! Component state.
//!
//! The only cross-call mutable state in the protocol is the token
//! whitelist; everything else is fixed at construction.

use std::collections::BTreeMap;

/// Append-only registry of assets accepted for token fee payment.
///
/// Supports only insert and contains; entries are never removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenWhitelist {
    entries: BTreeMap<u64, bool>,
}

impl TokenWhitelist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset_id: u64) {
        self.entries.insert(asset_id, true);
    }

    pub fn contains(&self, asset_id: u64) -> bool {
        self.entries.get(&asset_id).copied().unwrap_or(false)
    }
}
