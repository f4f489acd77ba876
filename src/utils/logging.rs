// src/utils/logging.rs - Logging helpers for a single name comparison
use log::{debug, error, info};
use std::time::Instant;

use crate::models::matching::{MatchReason, NormalizedName, SimilarityBreakdown};

/// Diagnostic side channel for one comparison. Never influences the verdict.
#[derive(Clone)]
pub struct ComparisonLogger {
    component: &'static str,
    component_emoji: &'static str,
    start_time: Instant,
}

impl Default for ComparisonLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonLogger {
    pub fn new() -> Self {
        Self {
            component: "COMPANY_NAME",
            component_emoji: "🏢",
            start_time: Instant::now(),
        }
    }

    pub fn log_start(&self, name_1: &str, name_2: &str, threshold: f64) {
        debug!(
            "[{}] {} 🚀 Comparing '{}' vs '{}' (threshold {:.2})",
            self.component, self.component_emoji, name_1, name_2, threshold
        );
    }

    pub fn log_normalized(&self, normalized_1: &NormalizedName, normalized_2: &NormalizedName) {
        info!(
            "[{}] {} 🔄 Normalized names: '{}' vs '{}'",
            self.component, self.component_emoji, normalized_1, normalized_2
        );
    }

    pub fn log_breakdown(&self, breakdown: &SimilarityBreakdown) {
        debug!(
            "[{}] {} 📊 Metrics: levenshtein={:.3}, jaro_winkler={:.3}, token_sort={:.3}",
            self.component,
            self.component_emoji,
            breakdown.levenshtein,
            breakdown.jaro_winkler,
            breakdown.token_sort
        );
    }

    pub fn log_score(&self, score: f64) {
        info!(
            "[{}] {} 📈 Similarity score: {:.3}",
            self.component, self.component_emoji, score
        );
    }

    pub fn log_verdict(&self, name_1: &str, name_2: &str, reason: &MatchReason) {
        let elapsed = self.start_time.elapsed();
        let marker = if reason.is_match() { "✅" } else { "❌" };
        info!(
            "[{}] {} {} Company name comparison: '{}' vs '{}' = {} ({}) [+{:.3}ms]",
            self.component,
            self.component_emoji,
            marker,
            name_1,
            name_2,
            reason.is_match(),
            reason.label(),
            elapsed.as_secs_f64() * 1000.0
        );
    }

    pub fn log_failure(&self, name_1: &str, name_2: &str, err: &anyhow::Error) {
        error!(
            "[{}] {} ❌ Error in company name matching ('{}' vs '{}'): {:#}",
            self.component, self.component_emoji, name_1, name_2, err
        );
    }
}
