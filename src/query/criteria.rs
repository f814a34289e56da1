//! Normalized query criteria and the filter union carried by a dispatch.

use crate::field::FieldValue;
use serde::{Deserialize, Serialize};

/// Comparison operator for a normalized criterion.
///
/// The lowercase spellings are the wire contract consumed by backend engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparitor {
    /// Case-insensitive wildcard match.
    Ilike,
    /// Case-sensitive wildcard match.
    Like,
    /// Exact equality.
    Eq,
}

impl Comparitor {
    /// Evaluate this operator against a candidate property value.
    ///
    /// `pattern` may contain `*` wildcards for the `like` family; segments
    /// between wildcards must appear in order. A pattern of `*` or `**`
    /// matches everything.
    pub fn matches(self, pattern: &str, candidate: &str) -> bool {
        match self {
            Comparitor::Eq => pattern == candidate,
            Comparitor::Like => wildcard_match(pattern, candidate),
            Comparitor::Ilike => {
                wildcard_match(&pattern.to_lowercase(), &candidate.to_lowercase())
            }
        }
    }
}

fn wildcard_match(pattern: &str, candidate: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == candidate;
    }

    let segments: Vec<&str> = pattern.split('*').collect();
    let mut rest = candidate;

    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            continue;
        }
        if i == 0 {
            // No leading wildcard: segment must anchor at the start.
            match rest.strip_prefix(segment) {
                Some(tail) => rest = tail,
                None => return false,
            }
        } else if i == segments.len() - 1 && !pattern.ends_with('*') {
            return rest.ends_with(segment);
        } else {
            match rest.find(segment) {
                Some(pos) => rest = &rest[pos + segment.len()..],
                None => return false,
            }
        }
    }

    true
}

/// One normalized filter unit, produced only by a service's plan step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryCriterion {
    pub comparitor: Comparitor,
    pub name: String,
    pub value: String,
}

impl QueryCriterion {
    pub fn new(comparitor: Comparitor, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            comparitor,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive substring criterion: `*value*`.
    pub fn ilike_contains(name: impl Into<String>, value: &str) -> Self {
        Self::new(Comparitor::Ilike, name, format!("*{}*", value))
    }
}

/// What a dispatch actually carries: either a raw field value forwarded
/// unmodified or a normalized criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryFilter {
    Field(FieldValue),
    Criterion(QueryCriterion),
}
