//! Environment-driven configuration for company name matching

use log::{debug, info, warn};
use std::env;
use std::path::PathBuf;

use crate::utils::constants::DEFAULT_MATCH_THRESHOLD;

pub const THRESHOLD_ENV: &str = "MATCH_THRESHOLD";
pub const EXCLUSION_FILE_ENV: &str = "EXCLUSION_WORDS_FILE";
pub const EXCLUSION_HEADER_ENV: &str = "EXCLUSION_WORDS_HAS_HEADER";

#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Minimum combined similarity for a fuzzy match
    pub threshold: f64,
    /// Optional CSV table of extra exclusion words (first column)
    pub exclusion_words_file: Option<PathBuf>,
    /// Whether the exclusion table starts with a header row
    pub exclusion_words_has_header: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
            exclusion_words_file: None,
            exclusion_words_has_header: false,
        }
    }
}

impl MatcherConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let threshold = match env::var(THRESHOLD_ENV) {
            Ok(raw) => raw.trim().parse::<f64>().unwrap_or_else(|_| {
                warn!(
                    "Invalid {} value '{}', falling back to {}",
                    THRESHOLD_ENV, raw, DEFAULT_MATCH_THRESHOLD
                );
                DEFAULT_MATCH_THRESHOLD
            }),
            Err(_) => DEFAULT_MATCH_THRESHOLD,
        };

        let exclusion_words_file = env::var(EXCLUSION_FILE_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let exclusion_words_has_header = env::var(EXCLUSION_HEADER_ENV)
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        debug!(
            "Matcher config: threshold={}, exclusion_file={:?}, has_header={}",
            threshold, exclusion_words_file, exclusion_words_has_header
        );

        Self {
            threshold,
            exclusion_words_file,
            exclusion_words_has_header,
        }
    }

    /// Log the current configuration
    pub fn log_config(&self) {
        info!("⚙️  Match threshold: {:.2}", self.threshold);
        match &self.exclusion_words_file {
            Some(path) => info!(
                "⚙️  Exclusion table: {} (header row: {})",
                path.display(),
                self.exclusion_words_has_header
            ),
            None => info!("⚙️  No exclusion table configured - built-in exclusions only"),
        }
    }
}
