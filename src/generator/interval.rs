use tracing::debug;

use crate::config::{DirectionPolicy, IntervalSettings};
use crate::pool::Element;
use crate::random::RandomSource;

/*
Interval Comparison
===================

The user hears a short melody made of steps and names each step's size.
Exactly one step is the target interval; the others come from the
comparison range, so the target has to be told apart from its neighbours.

    target 7, comparison [1, 12] \ {7}, length 4, ascending

      magnitudes   [3, 7, 2]          target on step 1
      offsets      [0, 3, 10, 12]

The target step is never the opening position: step `s` lands on element
`s + 1`, so the target always arrives at index 1 or later.

Two questions in a row with the same direction and magnitudes are boring
and easy to game. A repeat is regenerated, up to `MAX_REROLLS` times.
*/

/// Attempts at avoiding a repeat before accepting one
const MAX_REROLLS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn sign(self) -> Element {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

/// One generated interval-comparison melody
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalSequence {
    /// Cumulative offsets, starting at 0
    pub offsets: Vec<Element>,
    /// Step magnitudes in order; these are the scored answers
    pub magnitudes: Vec<Element>,
    pub direction: Direction,
    pub target: Element,
    /// Index into `magnitudes` of the target step
    pub target_step: usize,
}

impl IntervalSequence {
    fn signature(&self) -> (Direction, &[Element]) {
        (self.direction, &self.magnitudes)
    }
}

/// Builds interval-comparison melodies and avoids immediate repeats
#[derive(Debug, Clone, Default)]
pub struct IntervalGenerator {
    last_signature: Option<(Direction, Vec<Element>)>,
}

impl IntervalGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a melody of `length` elements (`length - 1` steps, at least one)
    pub fn generate(
        &mut self,
        settings: &IntervalSettings,
        length: usize,
        rng: &mut impl RandomSource,
    ) -> IntervalSequence {
        let steps = length.saturating_sub(1).max(1);

        let mut sequence = Self::build(settings, steps, rng);
        for attempt in 1..MAX_REROLLS {
            let repeated = self
                .last_signature
                .as_ref()
                .is_some_and(|(direction, magnitudes)| {
                    sequence.signature() == (*direction, magnitudes.as_slice())
                });
            if !repeated {
                break;
            }
            debug!(attempt, "interval question repeated, regenerating");
            sequence = Self::build(settings, steps, rng);
        }

        self.last_signature = Some((sequence.direction, sequence.magnitudes.clone()));
        sequence
    }

    fn build(
        settings: &IntervalSettings,
        steps: usize,
        rng: &mut impl RandomSource,
    ) -> IntervalSequence {
        let direction = match settings.direction {
            DirectionPolicy::Ascending => Direction::Up,
            DirectionPolicy::Descending => Direction::Down,
            DirectionPolicy::Random => {
                if rng.chance(0.5) {
                    Direction::Up
                } else {
                    Direction::Down
                }
            }
        };

        let target = if settings.targets.is_empty() {
            0
        } else {
            settings.targets[rng.pick_index(settings.targets.len())].saturating_abs()
        };
        let target_step = rng.pick_index(steps);
        let comparison = settings.comparison_candidates(target);

        let magnitudes: Vec<Element> = (0..steps)
            .map(|step| {
                if step == target_step || comparison.is_empty() {
                    target
                } else {
                    comparison[rng.pick_index(comparison.len())]
                }
            })
            .collect();

        let mut offsets = Vec::with_capacity(steps + 1);
        let mut offset: Element = 0;
        offsets.push(offset);
        for &magnitude in &magnitudes {
            offset = offset.saturating_add(direction.sign() * magnitude);
            offsets.push(offset);
        }

        IntervalSequence {
            offsets,
            magnitudes,
            direction,
            target,
            target_step,
        }
    }
}
