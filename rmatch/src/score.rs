//! Per-requirement scores and their weighted aggregate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::RequirementCategory;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementScore {
    pub requirement: String,
    pub score: f64,
    pub explanation: String,
}

impl RequirementScore {
    pub fn new(requirement: impl Into<String>, score: f64, explanation: impl Into<String>) -> Self {
        Self {
            requirement: requirement.into(),
            score: clamp_score(score),
            explanation: explanation.into(),
        }
    }

    /// Reads `score` and `explanation` from a model answer object.
    ///
    /// `requirement` is always the one that was asked about, whatever the
    /// model echoed back.
    pub fn from_json_object(requirement: &str, object: Option<&Map<String, Value>>) -> Self {
        let score = object
            .and_then(|object| object.get("score"))
            .and_then(score_value)
            .unwrap_or(MIN_SCORE);
        let explanation = object
            .and_then(|object| object.get("explanation"))
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();

        Self::new(requirement, score, explanation)
    }
}

fn score_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Relative weight of each category in the total score. Unset categories
/// weigh 1.0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryWeights {
    weights: BTreeMap<RequirementCategory, f64>,
}

impl CategoryWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negative weights count as zero.
    pub fn with_weight(mut self, category: RequirementCategory, weight: f64) -> Self {
        self.weights.insert(category, weight.max(0.0));
        self
    }

    pub fn weight(&self, category: RequirementCategory) -> f64 {
        self.weights.get(&category).copied().unwrap_or(1.0)
    }
}

/// The model's overall call on whether a candidate should move forward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromisingVerdict {
    pub promising: bool,
    pub explanation: String,
}

impl PromisingVerdict {
    pub fn new(promising: bool, explanation: impl Into<String>) -> Self {
        Self {
            promising,
            explanation: explanation.into(),
        }
    }

    /// Reads `promising` and `explanation` from a model answer object.
    ///
    /// Anything other than a boolean or a `"true"`/`"yes"` string counts as
    /// not promising.
    pub fn from_json_object(object: Option<&Map<String, Value>>) -> Self {
        let promising = object
            .and_then(|object| object.get("promising"))
            .is_some_and(verdict_value);
        let explanation = object
            .and_then(|object| object.get("explanation"))
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();

        Self::new(promising, explanation)
    }
}

fn verdict_value(value: &Value) -> bool {
    match value {
        Value::Bool(promising) => *promising,
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes"
        ),
        _ => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    pub total_score: f64,
    pub promising: bool,
    pub explanation: String,
    scores: BTreeMap<RequirementCategory, Vec<RequirementScore>>,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: RequirementCategory, score: RequirementScore) {
        self.scores.entry(category).or_default().push(score);
    }

    pub fn apply_verdict(&mut self, verdict: PromisingVerdict) {
        self.promising = verdict.promising;
        self.explanation = verdict.explanation;
    }

    /// Number of scored requirements across all categories.
    pub fn len(&self) -> usize {
        self.scores.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn scores(&self, category: RequirementCategory) -> &[RequirementScore] {
        self.scores.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories with at least one score, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (RequirementCategory, &[RequirementScore])> + '_ {
        self.scores
            .iter()
            .filter(|(_, scores)| !scores.is_empty())
            .map(|(category, scores)| (*category, scores.as_slice()))
    }

    pub fn category_mean(&self, category: RequirementCategory) -> Option<f64> {
        mean(self.scores(category))
    }

    /// Weighted mean of the category means. Categories without scores are
    /// left out of both numerator and denominator.
    pub fn compute_total_score(&self, weights: &CategoryWeights) -> f64 {
        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;

        for (category, scores) in self.iter() {
            let Some(category_mean) = mean(scores) else {
                continue;
            };
            let weight = weights.weight(category);
            weighted_sum += category_mean * weight;
            weight_sum += weight;
        }

        if weight_sum > 0.0 {
            clamp_score(weighted_sum / weight_sum)
        } else {
            MIN_SCORE
        }
    }
}

fn mean(scores: &[RequirementScore]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().map(|score| score.score).sum::<f64>() / scores.len() as f64)
}
