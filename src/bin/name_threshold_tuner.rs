// src/bin/name_threshold_tuner.rs
//
// Offline tool for choosing the company name match threshold.
//
// Reads a CSV of hand-labelled name pairs (name_1,name_2,is_match), runs every
// pair through the match decision at a range of threshold tiers and reports
// precision, recall and F1 per tier, suggesting the tier with the best F1.

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use company_matcher_lib::matching::manager::names_match;
use company_matcher_lib::models::matching::MatchThreshold;
use company_matcher_lib::utils::env::load_env;
use company_matcher_lib::utils::exclusion_table::read_exclusion_words;
use company_matcher_lib::ExclusionSet;

#[derive(Parser)]
#[command(author, version, about = "Evaluate match thresholds against labelled name pairs", long_about = None)]
struct TunerArgs {
    /// CSV with header `name_1,name_2,is_match`
    #[arg(long)]
    pairs: PathBuf,

    /// CSV table of additional exclusion words, first column
    #[arg(long)]
    exclusions: Option<PathBuf>,

    /// The exclusion table starts with a header row
    #[arg(long)]
    has_header: bool,

    /// Lowest threshold tier
    #[arg(long, default_value_t = 0.60)]
    min: f64,

    /// Highest threshold tier
    #[arg(long, default_value_t = 0.95)]
    max: f64,

    /// Distance between tiers
    #[arg(long, default_value_t = 0.05)]
    step: f64,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelledPair {
    name_1: String,
    name_2: String,
    is_match: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
struct TierResult {
    threshold: f64,
    true_positives: usize,
    false_positives: usize,
    true_negatives: usize,
    false_negatives: usize,
    precision: f64,
    recall: f64,
    f1: f64,
}

impl TierResult {
    fn record(&mut self, predicted: bool, expected: bool) {
        match (predicted, expected) {
            (true, true) => self.true_positives += 1,
            (true, false) => self.false_positives += 1,
            (false, false) => self.true_negatives += 1,
            (false, true) => self.false_negatives += 1,
        }
    }

    fn finalize(&mut self) {
        let tp = self.true_positives as f64;
        let predicted_positive = tp + self.false_positives as f64;
        let actual_positive = tp + self.false_negatives as f64;
        self.precision = if predicted_positive > 0.0 { tp / predicted_positive } else { 0.0 };
        self.recall = if actual_positive > 0.0 { tp / actual_positive } else { 0.0 };
        self.f1 = if self.precision + self.recall > 0.0 {
            2.0 * self.precision * self.recall / (self.precision + self.recall)
        } else {
            0.0
        };
    }
}

#[derive(Debug, Serialize)]
struct TuningReport {
    pairs_evaluated: usize,
    tiers: Vec<TierResult>,
    suggested_threshold: Option<f64>,
}

fn main() -> Result<()> {
    load_env();
    env_logger::init();

    let args = TunerArgs::parse();
    info!("Starting Name Threshold Tuner...");

    let tiers = threshold_tiers(args.min, args.max, args.step)?;
    let pairs = load_labelled_pairs(&args.pairs)?;
    if pairs.is_empty() {
        eprintln!("No labelled pairs found in {}. Exiting.", args.pairs.display());
        return Ok(());
    }
    info!("Loaded {} labelled pairs", pairs.len());

    let exclusion_words = match &args.exclusions {
        Some(path) => read_exclusion_words(path, args.has_header)?,
        None => Vec::new(),
    };
    let exclusions = ExclusionSet::build(&exclusion_words);

    let total_evaluations = (pairs.len() * tiers.len()) as u64;
    let scoring_pb = ProgressBar::new(total_evaluations);
    scoring_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    scoring_pb.set_message("Evaluating threshold tiers...");

    let mut results = Vec::with_capacity(tiers.len());
    for threshold in tiers {
        let mut tier = TierResult {
            threshold: threshold.value(),
            ..Default::default()
        };
        for pair in &pairs {
            let predicted = names_match(
                Some(pair.name_1.as_str()),
                Some(pair.name_2.as_str()),
                &exclusions,
                threshold,
            );
            tier.record(predicted, pair.is_match);
            scoring_pb.inc(1);
        }
        tier.finalize();
        results.push(tier);
    }
    scoring_pb.finish_with_message("Evaluation complete");

    let report = TuningReport {
        pairs_evaluated: pairs.len(),
        suggested_threshold: suggest_threshold(&results),
        tiers: results,
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize tuning report")?
        );
    } else {
        print_report(&report);
    }
    Ok(())
}

fn threshold_tiers(min: f64, max: f64, step: f64) -> Result<Vec<MatchThreshold>> {
    if step <= 0.0 || step.is_nan() {
        bail!("Tier step must be positive, got {}", step);
    }
    if min > max {
        bail!("Lowest tier {} is above highest tier {}", min, max);
    }
    let count = ((max - min) / step + 1e-9).floor() as usize + 1;
    (0..count)
        .map(|i| {
            let value = ((min + i as f64 * step) * 1000.0).round() / 1000.0;
            MatchThreshold::new(value)
        })
        .collect()
}

fn load_labelled_pairs(path: &Path) -> Result<Vec<LabelledPair>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open labelled pairs {}", path.display()))?;
    let mut pairs = Vec::new();
    for (row_idx, record) in reader.deserialize::<LabelledPair>().enumerate() {
        match record {
            Ok(pair) => pairs.push(pair),
            Err(e) => warn!("Skipping malformed labelled pair on row {}: {}", row_idx + 2, e),
        }
    }
    Ok(pairs)
}

/// Best F1; ties go to the stricter threshold.
fn suggest_threshold(results: &[TierResult]) -> Option<f64> {
    results
        .iter()
        .filter(|tier| tier.f1 > 0.0)
        .max_by(|a, b| {
            a.f1.partial_cmp(&b.f1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.threshold.partial_cmp(&b.threshold).unwrap_or(std::cmp::Ordering::Equal))
        })
        .map(|tier| tier.threshold)
}

fn print_report(report: &TuningReport) {
    println!("\n--- Threshold Tuning Report ({} pairs) ---", report.pairs_evaluated);
    println!(
        "{:>9} {:>5} {:>5} {:>5} {:>5} {:>9} {:>7} {:>6}",
        "threshold", "TP", "FP", "TN", "FN", "precision", "recall", "F1"
    );
    for tier in &report.tiers {
        println!(
            "{:>9.3} {:>5} {:>5} {:>5} {:>5} {:>9.3} {:>7.3} {:>6.3}",
            tier.threshold,
            tier.true_positives,
            tier.false_positives,
            tier.true_negatives,
            tier.false_negatives,
            tier.precision,
            tier.recall,
            tier.f1
        );
    }
    match report.suggested_threshold {
        Some(threshold) => println!("\nSuggested MATCH_THRESHOLD: {:.3}", threshold),
        None => println!("\nNo tier produced a true positive; add more matching pairs."),
    }
}
