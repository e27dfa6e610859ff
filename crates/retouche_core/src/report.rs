//! Per-transformation change counter.

use compact_str::CompactString;
use dashmap::DashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Number of changed files per transformation, shared across worker threads.
#[derive(Debug, Default)]
pub struct TransformReport {
    counts: DashMap<CompactString, usize>,
}

impl TransformReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one changed file for `transformation`.
    pub fn record(&self, transformation: &str) {
        *self
            .counts
            .entry(CompactString::new(transformation))
            .or_insert(0) += 1;
    }

    pub fn count(&self, transformation: &str) -> usize {
        self.counts.get(transformation).map_or(0, |count| *count)
    }

    /// All counters, sorted by transformation name.
    pub fn entries(&self) -> Vec<(CompactString, usize)> {
        let mut entries: Vec<_> = self
            .counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|entry| *entry.value()).sum()
    }
}

impl Serialize for TransformReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (name, count) in &entries {
            map.serialize_entry(name.as_str(), count)?;
        }
        map.end()
    }
}
