use tracing::debug;

use crate::pool::{Element, ElementRange, Pool};
use crate::random::RandomSource;
use crate::tracking::WeightTable;

/// Bias toward weighted picks once the table has more than this many entries
const BUSY_TABLE_ENTRIES: usize = 2;
const BIAS_BUSY: f64 = 0.7;
const BIAS_QUIET: f64 = 0.4;

/// Why a position got its element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickReason {
    /// Drawn from the needs-practice weights
    NeedsPractice,
    /// Uniform pick from the candidates
    Random,
}

/// Elements of one generated sequence with the reason for each pick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedSequence {
    pub elements: Vec<Element>,
    pub reasons: Vec<PickReason>,
}

/// Generates melodic sequences from a pool, biased by the needs-practice table
#[derive(Debug, Clone, Default)]
pub struct SequenceGenerator {
    /// Opening element of the previous sequence
    last_opening: Option<Element>,
}

impl SequenceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_opening(&self) -> Option<Element> {
        self.last_opening
    }

    /// Generate `length` elements. An empty pool yields an empty sequence.
    pub fn generate(
        &mut self,
        pool: &Pool,
        weights: &WeightTable,
        adjacency: ElementRange,
        length: usize,
        rng: &mut impl RandomSource,
    ) -> GeneratedSequence {
        let mut sequence = GeneratedSequence::default();
        if pool.is_empty() {
            return sequence;
        }

        let mut previous: Option<Element> = None;
        for position in 0..length {
            let candidates = self.candidates(pool, previous, adjacency);
            let (element, reason) = Self::pick(previous, &candidates, weights, rng);
            debug!(position, element, ?reason, "picked");

            sequence.elements.push(element);
            sequence.reasons.push(reason);
            previous = Some(element);
        }

        if let Some(&first) = sequence.elements.first() {
            self.last_opening = Some(first);
        }
        sequence
    }

    /// Narrow the pool for the position following `previous`
    fn candidates(&self, pool: &Pool, previous: Option<Element>, adjacency: ElementRange) -> Pool {
        match previous {
            None => match self.last_opening {
                Some(opening) if pool.len() > 1 => {
                    Pool::from_elements(pool.iter().filter(|&e| e != opening))
                }
                _ => pool.clone(),
            },
            Some(previous) => {
                let within = Pool::from_elements(pool.iter().filter(|&e| {
                    adjacency.contains(e.saturating_sub(previous).saturating_abs())
                }));
                if within.is_empty() {
                    // No legal neighbour: any note will do
                    pool.clone()
                } else {
                    within
                }
            }
        }
    }

    fn pick(
        previous: Option<Element>,
        candidates: &Pool,
        weights: &WeightTable,
        rng: &mut impl RandomSource,
    ) -> (Element, PickReason) {
        let bias = if weights.len() > BUSY_TABLE_ENTRIES {
            BIAS_BUSY
        } else {
            BIAS_QUIET
        };

        if rng.chance(bias) {
            if let Some(element) = weights.sample_weighted(previous, candidates, rng) {
                return (element, PickReason::NeedsPractice);
            }
        }

        let index = rng.pick_index(candidates.len());
        (candidates.as_slice()[index], PickReason::Random)
    }
}
