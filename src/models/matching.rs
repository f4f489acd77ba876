// src/models/matching.rs
use anyhow::{bail, Result};
use serde::Serialize;
use std::fmt;

use crate::utils::constants::DEFAULT_MATCH_THRESHOLD;

/// Canonical token sequence derived from a raw name. Tokens are lowercase,
/// alphanumeric, duplicate-free and already abbreviation-expanded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NormalizedName {
    text: String,
    #[serde(skip)]
    tokens: Vec<String>,
}

impl NormalizedName {
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let text = tokens.join(" ").trim().to_string();
        Self { text, tokens }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Minimum combined similarity for a fuzzy match, in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct MatchThreshold(f64);

impl MatchThreshold {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            bail!("Match threshold must be within [0, 1], got {}", value);
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_met_by(self, score: f64) -> bool {
        score >= self.0
    }
}

impl Default for MatchThreshold {
    fn default() -> Self {
        Self(DEFAULT_MATCH_THRESHOLD)
    }
}

/// The three similarity metrics for one pair of normalized strings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityBreakdown {
    pub levenshtein: f64,
    pub jaro_winkler: f64,
    pub token_sort: f64,
}

impl SimilarityBreakdown {
    /// Optimistic combination: a pair only has to do well under one metric.
    pub fn combined(&self) -> f64 {
        self.levenshtein.max(self.jaro_winkler).max(self.token_sort)
    }
}

/// Which decision state produced the verdict, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MatchReason {
    MissingName,
    RawExact,
    NormalizedExact,
    Substring,
    Fuzzy { score: f64 },
    BelowThreshold { score: f64 },
}

impl MatchReason {
    pub fn is_match(&self) -> bool {
        matches!(
            self,
            MatchReason::RawExact
                | MatchReason::NormalizedExact
                | MatchReason::Substring
                | MatchReason::Fuzzy { .. }
        )
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            MatchReason::Fuzzy { score } | MatchReason::BelowThreshold { score } => Some(*score),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchReason::MissingName => "missing name",
            MatchReason::RawExact => "raw exact match",
            MatchReason::NormalizedExact => "normalized exact match",
            MatchReason::Substring => "substring containment",
            MatchReason::Fuzzy { .. } => "fuzzy similarity",
            MatchReason::BelowThreshold { .. } => "below threshold",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub is_match: bool,
    pub reason: MatchReason,
    pub threshold: f64,
    pub normalized_names: Option<(NormalizedName, NormalizedName)>,
}

/// Everything the host supplies for a single comparison.
#[derive(Debug, Clone, Default)]
pub struct ComparisonRequest {
    pub name_1: Option<String>,
    pub name_2: Option<String>,
    pub exclusion_words: Vec<String>,
    pub threshold: Option<f64>,
}

impl ComparisonRequest {
    pub fn new(name_1: impl Into<String>, name_2: impl Into<String>) -> Self {
        Self {
            name_1: Some(name_1.into()),
            name_2: Some(name_2.into()),
            ..Default::default()
        }
    }

    pub fn with_exclusion_words(mut self, words: Vec<String>) -> Self {
        self.exclusion_words = words;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }
}
