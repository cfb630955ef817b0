//! Per-transition practice statistics.
//!
//! Two tables follow the user's mistakes:
//! - [`WeightTable`]: ordered `(previous, current)` pairs with a capped
//!   severity, used to bias future sequences toward weak transitions
//! - [`ConfusionTable`]: unordered element pairs counting how often one was
//!   mistaken for the other, used for reporting
//!
//! Both persist as `[keyString, count]` tuples; the string forms live only in
//! the `Display`/`FromStr` impls below.

pub mod confusion;
pub mod weights;

pub use confusion::ConfusionTable;
pub use weights::WeightTable;

use std::fmt;
use std::str::FromStr;

use crate::pool::Element;

/// Persisted shape of a table: `[keyString, count]` tuples
pub type TableEntries = Vec<(String, u32)>;

/// Ordered transition key. `previous = None` marks the first position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    pub previous: Option<Element>,
    pub current: Element,
}

impl PairKey {
    pub const fn new(previous: Option<Element>, current: Element) -> Self {
        Self { previous, current }
    }

    /// Key for the first element of a sequence
    pub const fn opening(current: Element) -> Self {
        Self::new(None, current)
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.previous {
            Some(previous) => write!(f, "{},{}", previous, self.current),
            None => write!(f, ",{}", self.current),
        }
    }
}

/// Reason a stored key string could not be read back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParseError(pub String);

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed pair key {:?}", self.0)
    }
}

impl std::error::Error for KeyParseError {}

fn split_pair(s: &str) -> Result<(&str, &str), KeyParseError> {
    s.split_once(',').ok_or_else(|| KeyParseError(s.to_string()))
}

fn parse_element(s: &str, whole: &str) -> Result<Element, KeyParseError> {
    s.trim()
        .parse()
        .map_err(|_| KeyParseError(whole.to_string()))
}

impl FromStr for PairKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (previous, current) = split_pair(s)?;
        let previous = if previous.trim().is_empty() {
            None
        } else {
            Some(parse_element(previous, s)?)
        };
        Ok(Self::new(previous, parse_element(current, s)?))
    }
}

/// Unordered element pair, always stored as `(lo, hi)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnorderedPair {
    lo: Element,
    hi: Element,
}

impl UnorderedPair {
    pub fn new(a: Element, b: Element) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    pub fn lo(&self) -> Element {
        self.lo
    }

    pub fn hi(&self) -> Element {
        self.hi
    }
}

impl fmt::Display for UnorderedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lo, self.hi)
    }
}

impl FromStr for UnorderedPair {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = split_pair(s)?;
        Ok(Self::new(parse_element(a, s)?, parse_element(b, s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_string_form() {
        assert_eq!(PairKey::new(Some(4), 7).to_string(), "4,7");
        assert_eq!(PairKey::opening(-5).to_string(), ",-5");
    }

    #[test]
    fn test_pair_key_parse() {
        assert_eq!("4,7".parse(), Ok(PairKey::new(Some(4), 7)));
        assert_eq!(",0".parse(), Ok(PairKey::opening(0)));
        assert_eq!("-12,-5".parse(), Ok(PairKey::new(Some(-12), -5)));
        assert!("4".parse::<PairKey>().is_err());
        assert!("a,7".parse::<PairKey>().is_err());
        assert!("4,".parse::<PairKey>().is_err());
    }

    #[test]
    fn test_opening_differs_from_any_previous() {
        // None is its own component value, not an alias for 0
        assert_ne!(PairKey::opening(7), PairKey::new(Some(0), 7));
    }

    #[test]
    fn test_unordered_pair_normalizes() {
        assert_eq!(UnorderedPair::new(7, 2), UnorderedPair::new(2, 7));
        assert_eq!(UnorderedPair::new(7, 2).to_string(), "2,7");
        assert_eq!("9,3".parse(), Ok(UnorderedPair::new(3, 9)));
    }
}
