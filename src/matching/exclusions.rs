// src/matching/exclusions.rs - Noise tokens stripped from names before comparison
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::utils::constants::BUILTIN_EXCLUSIONS;

static BUILTIN_EXCLUSION_SET: Lazy<HashSet<String>> =
    Lazy::new(|| BUILTIN_EXCLUSIONS.iter().map(|&w| w.to_string()).collect());

/// Case-insensitive set of tokens that carry no identity (legal suffixes, connectors,
/// caller-supplied noise words). Rebuilt for every comparison; never shared mutably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    words: HashSet<String>,
}

impl ExclusionSet {
    /// Union of the caller's words with the built-in suffix list.
    /// Entries are trimmed and lowercased; blank entries are ignored.
    pub fn build<I, S>(custom_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = BUILTIN_EXCLUSION_SET.clone();
        let mut custom_count = 0usize;
        for word in custom_words {
            let trimmed = word.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            if words.insert(trimmed.to_lowercase()) {
                custom_count += 1;
            }
        }
        debug!(
            "Exclusion set built: {} built-in words, {} additional custom words",
            BUILTIN_EXCLUSIONS.len(),
            custom_count
        );
        Self { words }
    }

    pub fn builtin() -> Self {
        Self {
            words: BUILTIN_EXCLUSION_SET.clone(),
        }
    }

    /// Whole-token membership, ignoring case.
    pub fn contains(&self, token: &str) -> bool {
        if self.words.contains(token) {
            return true;
        }
        self.words.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_words_always_present() {
        let set = ExclusionSet::build(Vec::<String>::new());
        for word in BUILTIN_EXCLUSIONS {
            assert!(set.contains(word), "missing built-in word {}", word);
        }
        assert_eq!(set.len(), BUILTIN_EXCLUSIONS.len());
        assert_eq!(set, ExclusionSet::default());
    }

    #[test]
    fn test_custom_words_trimmed_and_case_insensitive() {
        let set = ExclusionSet::build(["  Holdings ", "GROUP", "", "   "]);
        assert!(set.contains("holdings"));
        assert!(set.contains("Holdings"));
        assert!(set.contains("group"));
        assert!(set.contains("INC"));
        assert_eq!(set.len(), BUILTIN_EXCLUSIONS.len() + 2);
    }

    #[test]
    fn test_membership_is_whole_token() {
        let set = ExclusionSet::builtin();
        assert!(set.contains("corp"));
        assert!(!set.contains("corporate"));
        assert!(!set.contains("incubator"));
        assert!(!set.contains(""));
    }

    #[test]
    fn test_duplicate_custom_word_does_not_grow_set() {
        let set = ExclusionSet::build(["Inc", "inc", "LTD"]);
        assert_eq!(set.len(), BUILTIN_EXCLUSIONS.len());
    }
}
