// src/matching/manager.rs - Match decision for one pair of company names
use anyhow::Result;

use crate::matching::exclusions::ExclusionSet;
use crate::matching::name::normalize_name;
use crate::matching::similarity::similarity_breakdown;
use crate::models::matching::{
    ComparisonRequest, MatchOutcome, MatchReason, MatchThreshold, NormalizedName,
};
use crate::utils::constants::DEFAULT_MATCH_THRESHOLD;
use crate::utils::logging::ComparisonLogger;

/// Host entry point returning only the verdict.
pub fn execute(request: &ComparisonRequest) -> Result<bool> {
    execute_outcome(request).map(|outcome| outcome.is_match)
}

/// Builds the exclusion set from the caller's table, resolves the threshold and
/// runs the comparison. Faults are logged with both names and returned unchanged.
pub fn execute_outcome(request: &ComparisonRequest) -> Result<MatchOutcome> {
    let logger = ComparisonLogger::new();
    let name_1 = request.name_1.as_deref().unwrap_or("");
    let name_2 = request.name_2.as_deref().unwrap_or("");

    run_request(request, &logger).map_err(|e| {
        logger.log_failure(name_1, name_2, &e);
        e
    })
}

fn run_request(request: &ComparisonRequest, logger: &ComparisonLogger) -> Result<MatchOutcome> {
    let threshold = MatchThreshold::new(request.threshold.unwrap_or(DEFAULT_MATCH_THRESHOLD))?;
    let exclusions = ExclusionSet::build(&request.exclusion_words);
    let outcome = evaluate(
        request.name_1.as_deref(),
        request.name_2.as_deref(),
        &exclusions,
        threshold,
        logger,
    );
    Ok(outcome)
}

/// Decision states in strict precedence: missing name, raw exact, normalized exact,
/// substring containment, fuzzy threshold. The first one that applies decides.
pub fn compare_company_names(
    name_1: Option<&str>,
    name_2: Option<&str>,
    exclusions: &ExclusionSet,
    threshold: MatchThreshold,
) -> MatchOutcome {
    evaluate(name_1, name_2, exclusions, threshold, &ComparisonLogger::new())
}

pub fn names_match(
    name_1: Option<&str>,
    name_2: Option<&str>,
    exclusions: &ExclusionSet,
    threshold: MatchThreshold,
) -> bool {
    compare_company_names(name_1, name_2, exclusions, threshold).is_match
}

fn evaluate(
    name_1: Option<&str>,
    name_2: Option<&str>,
    exclusions: &ExclusionSet,
    threshold: MatchThreshold,
    logger: &ComparisonLogger,
) -> MatchOutcome {
    let raw_1 = name_1.unwrap_or("");
    let raw_2 = name_2.unwrap_or("");
    logger.log_start(raw_1, raw_2, threshold.value());

    let finish = |reason: MatchReason, normalized_names: Option<(NormalizedName, NormalizedName)>| {
        logger.log_verdict(raw_1, raw_2, &reason);
        MatchOutcome {
            is_match: reason.is_match(),
            reason,
            threshold: threshold.value(),
            normalized_names,
        }
    };

    if raw_1.trim().is_empty() || raw_2.trim().is_empty() {
        return finish(MatchReason::MissingName, None);
    }

    if raw_1.to_lowercase() == raw_2.to_lowercase() {
        return finish(MatchReason::RawExact, None);
    }

    let normalized_1 = normalize_name(raw_1, exclusions);
    let normalized_2 = normalize_name(raw_2, exclusions);
    logger.log_normalized(&normalized_1, &normalized_2);

    let reason = decide_normalized(&normalized_1, &normalized_2, threshold, logger);
    finish(reason, Some((normalized_1, normalized_2)))
}

fn decide_normalized(
    normalized_1: &NormalizedName,
    normalized_2: &NormalizedName,
    threshold: MatchThreshold,
    logger: &ComparisonLogger,
) -> MatchReason {
    if normalized_1.as_str().to_lowercase() == normalized_2.as_str().to_lowercase() {
        return MatchReason::NormalizedExact;
    }

    if is_substring_match(normalized_1.as_str(), normalized_2.as_str()) {
        return MatchReason::Substring;
    }

    let breakdown = similarity_breakdown(normalized_1.as_str(), normalized_2.as_str());
    logger.log_breakdown(&breakdown);
    let score = breakdown.combined();
    logger.log_score(score);

    if threshold.is_met_by(score) {
        MatchReason::Fuzzy { score }
    } else {
        MatchReason::BelowThreshold { score }
    }
}

/// Literal containment either way; an empty side never matches.
fn is_substring_match(name_1: &str, name_2: &str) -> bool {
    if name_1.is_empty() || name_2.is_empty() {
        return false;
    }
    name_1.contains(name_2) || name_2.contains(name_1)
}
