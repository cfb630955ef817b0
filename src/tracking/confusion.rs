use std::collections::BTreeMap;

use tracing::debug;

use super::{TableEntries, UnorderedPair};
use crate::pool::Element;

/// Unordered element pair → number of times one was mistaken for the other
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfusionTable {
    counts: BTreeMap<UnorderedPair, u32>,
}

impl ConfusionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted entries, skipping unparsable keys and zero counts
    pub fn from_entries(entries: impl IntoIterator<Item = (String, u32)>) -> Self {
        let mut table = Self::new();
        for (key, count) in entries {
            match key.parse::<UnorderedPair>() {
                Ok(pair) if count > 0 => {
                    // "5,2" and "2,5" normalize to one key
                    *table.counts.entry(pair).or_insert(0) += count;
                }
                Ok(_) => {}
                Err(e) => debug!("Skipping stored confusion: {}", e),
            }
        }
        table
    }

    pub fn entries(&self) -> TableEntries {
        self.counts
            .iter()
            .map(|(pair, &count)| (pair.to_string(), count))
            .collect()
    }

    /// Count one confusion between `a` and `b`, in either order
    pub fn record_confusion(&mut self, a: Element, b: Element) {
        let pair = UnorderedPair::new(a, b);
        let count = self.counts.entry(pair).or_insert(0);
        *count = count.saturating_add(1);
    }

    pub fn count(&self, a: Element, b: Element) -> u32 {
        self.counts
            .get(&UnorderedPair::new(a, b))
            .copied()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnorderedPair, u32)> + '_ {
        self.counts.iter().map(|(&pair, &count)| (pair, count))
    }

    /// Up to `n` pairs by descending count
    pub fn most_confused(&self, n: usize) -> Vec<(UnorderedPair, u32)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}
