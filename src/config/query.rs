/*
Configuration Query Form
========================

A practice setup can be shared as a flat query string:

    exercise=interval-comparison&targets=5,7&direction=random

Only fields that differ from `Configuration::default()` are written. On the
way back in, anything absent or unreadable keeps its default; a bad field
never rejects the whole query.

  key              value                         field
  ---------------  ----------------------------  ---------------------------
  exercise         melodic | single-note | ...   exercise
  elements         comma list                    base_elements
  range            min,max                       range
  period           integer                       period
  adjacency        min,max                       adjacency
  length           integer                       elements_per_question
  extra            integer                       extra_elements
  cap              integer                       severity_cap
  targets          comma list                    intervals.targets
  comparison       min,max                       intervals.comparison
  include_target   true | false                  intervals.include_target
  direction        ascending | descending | ...  intervals.direction
*/

use tracing::warn;
use url::form_urlencoded;

use super::{Configuration, DirectionPolicy, ExerciseKind};
use crate::pool::{Element, ElementRange};

fn join_list(values: &[Element]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn join_range(range: ElementRange) -> String {
    format!("{},{}", range.min, range.max)
}

fn parse_list(value: &str) -> Option<Vec<Element>> {
    if value.trim().is_empty() {
        return Some(Vec::new());
    }
    value.split(',').map(|v| v.trim().parse().ok()).collect()
}

fn parse_range(value: &str) -> Option<ElementRange> {
    let (min, max) = value.split_once(',')?;
    Some(ElementRange::new(min.trim().parse().ok()?, max.trim().parse().ok()?))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

impl Configuration {
    /// Encode the fields that differ from defaults
    pub fn to_query(&self) -> String {
        let defaults = Configuration::default();
        let mut query = form_urlencoded::Serializer::new(String::new());

        if self.exercise != defaults.exercise {
            query.append_pair("exercise", self.exercise.as_str());
        }
        if self.base_elements != defaults.base_elements {
            query.append_pair("elements", &join_list(&self.base_elements));
        }
        if self.range != defaults.range {
            query.append_pair("range", &join_range(self.range));
        }
        if self.period != defaults.period {
            query.append_pair("period", &self.period.to_string());
        }
        if self.adjacency != defaults.adjacency {
            query.append_pair("adjacency", &join_range(self.adjacency));
        }
        if self.elements_per_question != defaults.elements_per_question {
            query.append_pair("length", &self.elements_per_question.to_string());
        }
        if self.extra_elements != defaults.extra_elements {
            query.append_pair("extra", &self.extra_elements.to_string());
        }
        if self.severity_cap != defaults.severity_cap {
            query.append_pair("cap", &self.severity_cap.to_string());
        }

        let (ours, theirs) = (&self.intervals, &defaults.intervals);
        if ours.targets != theirs.targets {
            query.append_pair("targets", &join_list(&ours.targets));
        }
        if ours.comparison != theirs.comparison {
            query.append_pair("comparison", &join_range(ours.comparison));
        }
        if ours.include_target != theirs.include_target {
            query.append_pair("include_target", &ours.include_target.to_string());
        }
        if ours.direction != theirs.direction {
            query.append_pair("direction", ours.direction.as_str());
        }

        query.finish()
    }

    /// Decode a query string; absent or unreadable fields keep their defaults.
    /// A leading `?` is ignored.
    pub fn from_query(query: &str) -> Configuration {
        let mut config = Configuration::default();
        let query = query.trim().trim_start_matches('?');

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let applied = match key.as_ref() {
                "exercise" => ExerciseKind::from_label(&value).map(|v| config.exercise = v),
                "elements" => parse_list(&value).map(|v| config.base_elements = v),
                "range" => parse_range(&value).map(|v| config.range = v),
                "period" => value.trim().parse().ok().map(|v| config.period = v),
                "adjacency" => parse_range(&value).map(|v| config.adjacency = v),
                "length" => value
                    .trim()
                    .parse()
                    .ok()
                    .map(|v| config.elements_per_question = v),
                "extra" => value.trim().parse().ok().map(|v| config.extra_elements = v),
                "cap" => value.trim().parse().ok().map(|v| config.severity_cap = v),
                "targets" => parse_list(&value).map(|v| config.intervals.targets = v),
                "comparison" => parse_range(&value).map(|v| config.intervals.comparison = v),
                "include_target" => {
                    parse_bool(&value).map(|v| config.intervals.include_target = v)
                }
                "direction" => {
                    DirectionPolicy::from_label(&value).map(|v| config.intervals.direction = v)
                }
                _ => {
                    warn!("Ignoring unknown configuration field '{}'", key);
                    Some(())
                }
            };

            if applied.is_none() {
                warn!("Ignoring unreadable value '{}' for '{}', using default", value, key);
            }
        }

        config
    }
}
