use anyhow::{Context, Result};
use clap::Parser;
use company_matcher_lib::matching::manager::execute_outcome;
use company_matcher_lib::models::matching::ComparisonRequest;
use company_matcher_lib::utils::env::load_env;
use company_matcher_lib::utils::exclusion_table::read_exclusion_words;
use company_matcher_lib::utils::matcher_config::MatcherConfig;
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Decide whether two company names denote the same organization", long_about = None)]
struct MatchArgs {
    /// First company name (may be empty)
    name_1: String,

    /// Second company name (may be empty)
    name_2: String,

    /// CSV table of additional exclusion words, first column
    #[arg(long)]
    exclusions: Option<PathBuf>,

    /// The exclusion table starts with a header row
    #[arg(long)]
    has_header: bool,

    /// Minimum similarity for a fuzzy match, overrides MATCH_THRESHOLD
    #[arg(long)]
    threshold: Option<f64>,

    /// Print the full decision as JSON instead of a bare verdict
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    load_env();
    env_logger::init();

    let args = MatchArgs::parse();
    let mut config = MatcherConfig::from_env();
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(path) = args.exclusions {
        config.exclusion_words_file = Some(path);
        config.exclusion_words_has_header = args.has_header;
    }
    config.log_config();

    let exclusion_words = match &config.exclusion_words_file {
        Some(path) => read_exclusion_words(path, config.exclusion_words_has_header)?,
        None => Vec::new(),
    };

    let request = ComparisonRequest {
        name_1: Some(args.name_1),
        name_2: Some(args.name_2),
        exclusion_words,
        threshold: Some(config.threshold),
    };

    let outcome = execute_outcome(&request)?;
    if args.json {
        let rendered =
            serde_json::to_string_pretty(&outcome).context("Failed to serialize match outcome")?;
        println!("{}", rendered);
        return Ok(());
    }

    info!("Verdict: {}", outcome.is_match);
    println!("{}", outcome.is_match);
    Ok(())
}
