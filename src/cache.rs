//! Key-value side cache for passing state between decoupled test functions.
//!
//! A miss returns the default `Bool(false)` value, indistinguishable from a
//! stored false boolean. That is a known limitation of the contract, kept so
//! callers never have to branch on presence.

use crate::value::TestValue;
use std::collections::HashMap;

/// String-keyed store of [`TestValue`]s, owned by the harness session.
#[derive(Debug, Default)]
pub struct KvCache {
    entries: HashMap<String, TestValue>,
}

impl KvCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: TestValue) {
        self.entries.insert(key.into(), value);
    }

    /// Returns a copy of the stored value, or `Bool(false)` when absent.
    pub fn get(&self, key: &str) -> TestValue {
        self.entries.get(key).cloned().unwrap_or_default()
    }
}
