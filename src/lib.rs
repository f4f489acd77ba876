//! Decides whether two free-text organization names denote the same entity.
//!
//! Names are normalized (primary-name extraction, case folding, punctuation and
//! legal-suffix removal, abbreviation expansion) and then compared through a
//! precedence of exact, normalized-exact, containment and fuzzy checks.
pub mod matching;
pub mod models;
pub mod utils;

pub use matching::{compare_company_names, execute, execute_outcome, names_match, ExclusionSet};
pub use models::matching::{ComparisonRequest, MatchOutcome, MatchReason, MatchThreshold};
