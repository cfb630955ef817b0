//! Exercise configuration.
//!
//! A [`Configuration`] fixes everything a session needs: what to draw from,
//! how sequences are shaped and how hard mistakes weigh. It is immutable for
//! the duration of a session and travels inside every session record, so the
//! serde shape is strict (`deny_unknown_fields`, no field defaults). A stored
//! record whose configuration no longer matches this shape is dropped on read.

pub mod query;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pool::{build_pool, Element, ElementRange, Pool, OCTAVE};
use crate::tracking::weights::DEFAULT_CAP;

/// Widest `range` or `comparison` span a configuration may use, in elements
pub const MAX_SPAN: u64 = 1024;

fn check_span(field: &'static str, range: ElementRange) -> Result<(), ConfigError> {
    if range.span() > MAX_SPAN {
        return Err(ConfigError::RangeTooWide {
            field,
            min: range.min,
            max: range.max,
            limit: MAX_SPAN,
        });
    }
    Ok(())
}

/// What kind of drill a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    /// Identify every note of a short melody
    Melodic,
    /// Identify one note per question
    SingleNote,
    /// Identify the step sizes of a melody built around a target interval
    IntervalComparison,
}

impl ExerciseKind {
    /// Label used in session records and table names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Melodic => "melodic",
            Self::SingleNote => "single-note",
            Self::IntervalComparison => "interval-comparison",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "melodic" => Some(Self::Melodic),
            "single-note" => Some(Self::SingleNote),
            "interval-comparison" => Some(Self::IntervalComparison),
            _ => None,
        }
    }
}

/// Direction of interval-comparison sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionPolicy {
    Ascending,
    Descending,
    /// Drawn per question
    Random,
}

impl DirectionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
            Self::Random => "random",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "ascending" => Some(Self::Ascending),
            "descending" => Some(Self::Descending),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

/// Settings only the interval-comparison drill reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntervalSettings {
    /// Interval magnitudes a question may be built around
    pub targets: Vec<Element>,
    /// Magnitudes the other steps are drawn from
    pub comparison: ElementRange,
    /// Allow the target magnitude on non-target steps
    pub include_target: bool,
    pub direction: DirectionPolicy,
}

impl Default for IntervalSettings {
    fn default() -> Self {
        Self {
            targets: vec![7],
            comparison: ElementRange::new(1, 12),
            include_target: false,
            direction: DirectionPolicy::Ascending,
        }
    }
}

impl IntervalSettings {
    /// Magnitudes available for non-target steps around `target`
    pub fn comparison_candidates(&self, target: Element) -> Vec<Element> {
        if self.comparison.is_inverted() {
            return Vec::new();
        }
        (self.comparison.min..=self.comparison.max)
            .filter(|&m| self.include_target || m != target.saturating_abs())
            .collect()
    }
}

/// Full session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    pub exercise: ExerciseKind,
    /// Base elements expanded across `range`
    pub base_elements: Vec<Element>,
    pub range: ElementRange,
    /// Repetition period for expansion and answer equivalence
    pub period: i32,
    /// Allowed absolute distance between consecutive elements
    pub adjacency: ElementRange,
    /// Scored positions per question
    pub elements_per_question: usize,
    /// Trailing unscored elements (melodic drills only)
    pub extra_elements: usize,
    /// Severity cap of the needs-practice table
    pub severity_cap: u32,
    pub intervals: IntervalSettings,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            exercise: ExerciseKind::Melodic,
            // Major scale
            base_elements: vec![0, 2, 4, 5, 7, 9, 11],
            range: ElementRange::new(0, 12),
            period: OCTAVE,
            adjacency: ElementRange::new(1, 12),
            elements_per_question: 3,
            extra_elements: 0,
            severity_cap: DEFAULT_CAP,
            intervals: IntervalSettings::default(),
        }
    }
}

impl Configuration {
    /// Check everything that does not depend on the built pool
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elements_per_question == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if self.adjacency.is_inverted() {
            return Err(ConfigError::InvertedAdjacency {
                min: self.adjacency.min,
                max: self.adjacency.max,
            });
        }
        if self.severity_cap == 0 {
            return Err(ConfigError::ZeroCap);
        }
        check_span("range", self.range)?;

        if self.exercise == ExerciseKind::IntervalComparison {
            let settings = &self.intervals;
            if settings.targets.is_empty() {
                return Err(ConfigError::NoTargets);
            }
            if self.elements_per_question < 2 {
                return Err(ConfigError::TooShortForIntervals(self.elements_per_question));
            }
            check_span("comparison", settings.comparison)?;
            if let Some(&target) = settings
                .targets
                .iter()
                .find(|t| u64::from(t.unsigned_abs()) > MAX_SPAN)
            {
                return Err(ConfigError::TargetTooLarge(target, MAX_SPAN));
            }
            // Only one step is the target; the rest need somewhere to come from
            let needs_comparison = self.elements_per_question > 2;
            if needs_comparison
                && settings
                    .targets
                    .iter()
                    .any(|&t| settings.comparison_candidates(t).is_empty())
            {
                return Err(ConfigError::EmptyComparison {
                    min: settings.comparison.min,
                    max: settings.comparison.max,
                });
            }
        }

        Ok(())
    }

    /// Scored positions per question for this exercise
    pub fn scored_length(&self) -> usize {
        match self.exercise {
            ExerciseKind::SingleNote => 1,
            _ => self.elements_per_question,
        }
    }

    /// Elements the user may answer with.
    ///
    /// Pitch drills expand the base set across the range. Interval drills
    /// answer with magnitudes, so the pool is the comparison range plus the
    /// targets.
    pub fn build_pool(&self) -> Pool {
        match self.exercise {
            ExerciseKind::Melodic | ExerciseKind::SingleNote => build_pool(
                self.base_elements.iter().copied(),
                self.range,
                self.period,
            ),
            ExerciseKind::IntervalComparison => {
                let settings = &self.intervals;
                let comparison = if settings.comparison.is_inverted() {
                    Vec::new()
                } else {
                    (settings.comparison.min..=settings.comparison.max).collect()
                };
                Pool::from_elements(
                    comparison
                        .into_iter()
                        .chain(settings.targets.iter().map(|t| t.saturating_abs())),
                )
            }
        }
    }

    /// Period used when checking answers; interval answers compare exactly
    pub fn answer_period(&self) -> Option<i32> {
        match self.exercise {
            ExerciseKind::IntervalComparison => None,
            _ if self.period > 0 => Some(self.period),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Configuration::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(
            config.build_pool().as_slice(),
            &[0, 2, 4, 5, 7, 9, 11, 12]
        );
    }

    #[test]
    fn test_validation_errors() {
        let config = Configuration {
            elements_per_question: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLength));

        let config = Configuration {
            adjacency: ElementRange::new(5, 2),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedAdjacency { min: 5, max: 2 })
        ));

        let config = Configuration {
            severity_cap: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCap));
    }

    #[test]
    fn test_interval_validation() {
        let mut config = Configuration {
            exercise: ExerciseKind::IntervalComparison,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));

        config.intervals.targets.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoTargets));

        config.intervals.targets = vec![7];
        config.intervals.comparison = ElementRange::new(7, 7);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyComparison { .. })
        ));

        // Two elements means one step: the target alone
        config.elements_per_question = 2;
        assert_eq!(config.validate(), Ok(()));

        config.elements_per_question = 1;
        assert_eq!(config.validate(), Err(ConfigError::TooShortForIntervals(1)));
    }

    #[test]
    fn test_extreme_ranges_are_rejected() {
        let config = Configuration::from_query("range=0,2147483647");
        assert_eq!(
            config.validate(),
            Err(ConfigError::RangeTooWide {
                field: "range",
                min: 0,
                max: i32::MAX,
                limit: MAX_SPAN,
            })
        );

        let config = Configuration::from_query(
            "exercise=interval-comparison&comparison=-2147483648,2147483647",
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RangeTooWide { field: "comparison", .. })
        ));

        let config = Configuration::from_query("exercise=interval-comparison&targets=-2147483648");
        assert_eq!(
            config.validate(),
            Err(ConfigError::TargetTooLarge(i32::MIN, MAX_SPAN))
        );

        // Far from zero is fine as long as the span is sane
        let config = Configuration {
            range: ElementRange::new(i32::MAX - 24, i32::MAX),
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
        assert!(!config.build_pool().is_empty());
    }

    #[test]
    fn test_comparison_candidates() {
        let mut settings = IntervalSettings {
            comparison: ElementRange::new(3, 5),
            targets: vec![4],
            ..Default::default()
        };
        assert_eq!(settings.comparison_candidates(4), vec![3, 5]);
        settings.include_target = true;
        assert_eq!(settings.comparison_candidates(4), vec![3, 4, 5]);
    }

    #[test]
    fn test_scored_length_and_answer_period() {
        let config = Configuration {
            exercise: ExerciseKind::SingleNote,
            elements_per_question: 4,
            ..Default::default()
        };
        assert_eq!(config.scored_length(), 1);
        assert_eq!(config.answer_period(), Some(12));

        let config = Configuration {
            exercise: ExerciseKind::IntervalComparison,
            ..Default::default()
        };
        assert_eq!(config.answer_period(), None);
    }

    #[test]
    fn test_json_rejects_unknown_fields() {
        let mut value = serde_json::to_value(Configuration::default()).unwrap();
        value["tempo"] = serde_json::json!(120);
        assert!(serde_json::from_value::<Configuration>(value).is_err());
    }

    #[test]
    fn test_labels() {
        for kind in [
            ExerciseKind::Melodic,
            ExerciseKind::SingleNote,
            ExerciseKind::IntervalComparison,
        ] {
            assert_eq!(ExerciseKind::from_label(kind.as_str()), Some(kind));
        }
        assert_eq!(ExerciseKind::from_label("rhythm"), None);
    }
}
