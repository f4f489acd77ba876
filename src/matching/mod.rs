// src/matching/mod.rs
pub mod exclusions;
pub mod manager;
pub mod name;
pub mod similarity;

pub use exclusions::ExclusionSet;
pub use manager::{compare_company_names, execute, execute_outcome, names_match};
pub use name::{normalize_name, AbbreviationTable};
pub use similarity::calculate_similarity;
