/*
Element Pool
============

Every drill draws from a pool: the finite set of elements a question may
contain. The pool is derived from a small base set (a scale, a chord, a
handful of intervals) by repeating each base element every `period` steps
across an inclusive range.

Vocabulary
----------

  element   An integer offset. For melodic drills it is semitones from the
            root (0 = root, 12 = root an octave up, -5 = the fifth below).
            For interval drills it is an interval magnitude in semitones.

  period    The distance after which content repeats. 12 for anything
            octave-periodic. A period <= 0 disables expansion.

  range     Inclusive `[min, max]` bounds every pool element must lie in.


Expansion
---------

For each base element we find its lowest repeat inside the range (as if
walking DOWN by the period until the next step would leave it), then walk UP
emitting every value inside it:

    base {0, 4, 7}, period 12, range [-12, 12]

      0 → -12 → emit -12, 0, 12
      4 →  -8 → emit  -8, 4        (16 > 12)
      7 →  -5 → emit  -5, 7        (19 > 12)

Bounds may sit anywhere in `i32`; the walk is done in `i64`.

    pool = [-12, -8, -5, 0, 4, 7, 12]

The result is deduplicated and sorted ascending.
*/

pub mod names;

pub use names::{interval_name, parse_pitch, pitch_name};

use serde::{Deserialize, Serialize};

/// Atomic musical unit: a pitch offset or an interval magnitude
pub type Element = i32;

/// Octave period in semitones
pub const OCTAVE: i32 = 12;

/// Inclusive integer range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementRange {
    pub min: Element,
    pub max: Element,
}

impl ElementRange {
    pub const fn new(min: Element, max: Element) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, element: Element) -> bool {
        element >= self.min && element <= self.max
    }

    /// True when min > max
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Distance from min to max; 0 when inverted
    pub fn span(&self) -> u64 {
        if self.is_inverted() {
            return 0;
        }
        (i64::from(self.max) - i64::from(self.min)).unsigned_abs()
    }
}

/// Duplicate-free, ascending-sorted set of candidate elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    elements: Vec<Element>,
}

impl Pool {
    /// Build a pool directly from elements (sorted and deduplicated)
    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        let mut elements: Vec<Element> = elements.into_iter().collect();
        elements.sort_unstable();
        elements.dedup();
        Self { elements }
    }

    pub fn contains(&self, element: Element) -> bool {
        self.elements.binary_search(&element).is_ok()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = Element> + '_ {
        self.elements.iter().copied()
    }
}

/// Expand `base` across `range`, repeating every `period`
pub fn build_pool(
    base: impl IntoIterator<Item = Element>,
    range: ElementRange,
    period: i32,
) -> Pool {
    if range.is_inverted() {
        return Pool::default();
    }

    let (min, max) = (i64::from(range.min), i64::from(range.max));
    let mut out = Vec::new();
    for element in base {
        if period <= 0 {
            if range.contains(element) {
                out.push(element);
            }
            continue;
        }

        // Lowest repeat of the element at or above min, then every period up.
        // Widened so bounds at the edges of i32 cannot overflow.
        let period = i64::from(period);
        let mut value = min + (i64::from(element) - min).rem_euclid(period);
        while value <= max {
            if let Ok(value) = Element::try_from(value) {
                out.push(value);
            }
            value += period;
        }
    }

    Pool::from_elements(out)
}

/// Reduce an element to its single-period value (0..period)
///
/// Octave-equivalent answers compare equal after this reduction. A period
/// <= 0 leaves the element untouched.
pub fn canonical(element: Element, period: i32) -> Element {
    if period <= 0 {
        element
    } else {
        element.rem_euclid(period)
    }
}
