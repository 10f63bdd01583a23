//! Dataset fingerprinting and explicit result caching.
//!
//! A cached result is reused only when both the dataset fingerprint and
//! the scenario fingerprint match; any other change is a miss. Callers
//! own the cache and its lifetime, so staleness is impossible by
//! construction rather than by convention.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use pprcost_engine::model::{CampaignResult, EntityRecord};

/// Content hash of a normalized dataset. Stable across runs: derived
/// from the canonical JSON form of the records, in input order.
pub fn dataset_fingerprint(records: &[EntityRecord]) -> String {
    let mut hasher = Sha256::new();
    for record in records {
        // EntityRecord serialization is deterministic (struct field order).
        if let Ok(json) = serde_json::to_string(record) {
            hasher.update(json.as_bytes());
            hasher.update(b"\n");
        }
    }
    format!("{:x}", hasher.finalize())
}

/// In-memory cache of campaign results keyed by (dataset fingerprint,
/// scenario fingerprint).
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<(String, String), CampaignResult>,
    hits: usize,
    misses: usize,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, dataset: &str, scenario: &str) -> Option<&CampaignResult> {
        let key = (dataset.to_string(), scenario.to_string());
        match self.entries.get(&key) {
            Some(result) => {
                self.hits += 1;
                tracing::debug!(dataset, scenario, "result cache hit");
                Some(result)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, dataset: &str, scenario: &str, result: CampaignResult) {
        self.entries
            .insert((dataset.to_string(), scenario.to_string()), result);
    }

    /// Drop every entry for a dataset, e.g. after the source file is
    /// re-uploaded.
    pub fn invalidate_dataset(&mut self, dataset: &str) {
        self.entries.retain(|(d, _), _| d != dataset);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }
}
