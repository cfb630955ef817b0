use std::collections::BTreeMap;

use tracing::debug;

use super::{PairKey, TableEntries};
use crate::pool::{Element, Pool};
use crate::random::RandomSource;

/*
Needs-Practice Weights
======================

Each ordered transition `(previous, current)` the user has stumbled on
carries a severity in `1..=cap`. Severity drives how often the generator
revisits that transition.

Update Rules
------------

  success   s → s - 1, entry removed when it reaches 0
  failure   s → min(cap, s + 3)   while s < 3
            s → min(cap, s + 1)   once s >= 3

A first mistake jumps straight to 3 so the pair surfaces quickly; further
mistakes on an already flagged pair only nudge it, and the cap bounds it.

A failure also bumps the key formed from the same `previous` and the element
the user actually chose, by 1 (capped). That key records "heard X, answered
Y" and only decays if the user later gets that exact transition right.

Sampling
--------

Candidates are the stored keys for one `previous` whose `current` is in the
candidate pool. Draw `r` uniformly in `[0, total)` and walk the candidates in
key order, accumulating weight until the running total exceeds `r`:

    weights  [1, 9]      total 10
    r = 0.4  → first     (1 > 0.4)
    r = 3.0  → second    (1 <= 3.0, 10 > 3.0)

Floating-point drift can leave `r` unreached; the last candidate is the
fallback in that case.
*/

/// Default severity cap
pub const DEFAULT_CAP: u32 = 10;

/// Severities below this get the large increment on failure
const ESCALATE_BELOW: u32 = 3;
const EARLY_INCREMENT: u32 = 3;
const LATE_INCREMENT: u32 = 1;

/// Ordered transition → capped severity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    cap: u32,
    entries: BTreeMap<PairKey, u32>,
}

impl WeightTable {
    /// Create an empty table. A cap of 0 is raised to 1.
    pub fn new(cap: u32) -> Self {
        Self {
            cap: cap.max(1),
            entries: BTreeMap::new(),
        }
    }

    /// Restore a table from persisted entries.
    ///
    /// Unparsable keys and zero counts are skipped; severities above the
    /// cap are clamped to it.
    pub fn from_entries(cap: u32, entries: impl IntoIterator<Item = (String, u32)>) -> Self {
        let mut table = Self::new(cap);
        for (key, severity) in entries {
            match key.parse::<PairKey>() {
                Ok(key) if severity > 0 => {
                    table.entries.insert(key, severity.min(table.cap));
                }
                Ok(_) => {}
                Err(e) => debug!("Skipping stored weight: {}", e),
            }
        }
        table
    }

    /// Persisted form, in key order
    pub fn entries(&self) -> TableEntries {
        self.entries
            .iter()
            .map(|(key, &severity)| (key.to_string(), severity))
            .collect()
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// Number of distinct stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all stored severities
    pub fn total_severity(&self) -> u32 {
        self.entries.values().sum()
    }

    /// Current severity (0 when absent)
    pub fn severity(&self, key: PairKey) -> u32 {
        self.entries.get(&key).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PairKey, u32)> + '_ {
        self.entries.iter().map(|(&key, &severity)| (key, severity))
    }

    /// Up to `n` keys by descending severity (ties in key order)
    pub fn hardest(&self, n: usize) -> Vec<(PairKey, u32)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Decay a key after a correct answer
    pub fn record_success(&mut self, key: PairKey) {
        if let Some(severity) = self.entries.get_mut(&key) {
            *severity -= 1;
            if *severity == 0 {
                self.entries.remove(&key);
                debug!(%key, "weight cleared");
            }
        }
    }

    /// Escalate `key` after a wrong answer and bump `incorrect_key` by one.
    ///
    /// `incorrect_key` only decays through `record_success` on that exact
    /// transition, which a user who never meets it will not trigger.
    pub fn record_failure(&mut self, key: PairKey, incorrect_key: PairKey) {
        let current = self.severity(key);
        let increment = if current < ESCALATE_BELOW {
            EARLY_INCREMENT
        } else {
            LATE_INCREMENT
        };
        let escalated = (current + increment).min(self.cap);
        self.entries.insert(key, escalated);

        let chosen = (self.severity(incorrect_key) + 1).min(self.cap);
        self.entries.insert(incorrect_key, chosen);

        debug!(%key, severity = escalated, %incorrect_key, chosen, "weight escalated");
    }

    /// Weighted draw among stored successors of `previous` that are in `candidates`
    pub fn sample_weighted(
        &self,
        previous: Option<Element>,
        candidates: &Pool,
        rng: &mut impl RandomSource,
    ) -> Option<Element> {
        let lower = PairKey::new(previous, Element::MIN);
        let upper = PairKey::new(previous, Element::MAX);
        let matches: Vec<(Element, u32)> = self
            .entries
            .range(lower..=upper)
            .filter(|(key, _)| candidates.contains(key.current))
            .map(|(key, &severity)| (key.current, severity))
            .collect();

        let (&(last, _), _) = matches.split_last()?;
        let total: f64 = matches.iter().map(|&(_, w)| w as f64).sum();
        let r = rng.next_unit() * total;

        let mut running = 0.0;
        for &(element, weight) in &matches {
            running += weight as f64;
            if running > r {
                return Some(element);
            }
        }
        Some(last)
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::new(DEFAULT_CAP)
    }
}
