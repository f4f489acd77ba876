// src/matching/similarity.rs - String similarity metrics over normalized names
//
// All metrics operate on chars, not bytes, and are total over empty input:
// two empty strings are identical (1.0), one empty string shares nothing (0.0).

use strsim::normalized_levenshtein;

use crate::models::matching::{NormalizedName, SimilarityBreakdown};
use crate::utils::constants::{WINKLER_MAX_PREFIX, WINKLER_PREFIX_SCALE};

/// Combined score for two normalized names: the best of the three metrics.
pub fn calculate_similarity(name_1: &NormalizedName, name_2: &NormalizedName) -> f64 {
    similarity_breakdown(name_1.as_str(), name_2.as_str()).combined()
}

pub fn similarity_breakdown(s1: &str, s2: &str) -> SimilarityBreakdown {
    SimilarityBreakdown {
        levenshtein: levenshtein_similarity(s1, s2),
        jaro_winkler: jaro_winkler_similarity(s1, s2),
        token_sort: token_sort_similarity(s1, s2),
    }
}

/// `1 - distance / max(len)` with unit insert/delete/substitute costs.
pub fn levenshtein_similarity(s1: &str, s2: &str) -> f64 {
    normalized_levenshtein(s1, s2)
}

/// Jaro similarity with the Winkler prefix boost (p = 0.1, prefix capped at 4).
/// The boost is applied unconditionally, not only above a Jaro floor.
pub fn jaro_winkler_similarity(s1: &str, s2: &str) -> f64 {
    if s1 == s2 {
        return 1.0;
    }

    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let (len1, len2) = (s1_chars.len(), s2_chars.len());

    if len1 == 0 || len2 == 0 {
        return 0.0;
    }

    let match_window = (len1.max(len2) / 2).saturating_sub(1);

    let mut s1_matches = vec![false; len1];
    let mut s2_matches = vec![false; len2];
    let mut matches = 0usize;

    for i in 0..len1 {
        let start = i.saturating_sub(match_window);
        let end = (i + match_window + 1).min(len2);
        for j in start..end {
            if s2_matches[j] || s1_chars[i] != s2_chars[j] {
                continue;
            }
            s1_matches[i] = true;
            s2_matches[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let mut transpositions = 0usize;
    let mut k = 0usize;
    for i in 0..len1 {
        if !s1_matches[i] {
            continue;
        }
        while !s2_matches[k] {
            k += 1;
        }
        if s1_chars[i] != s2_chars[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    let jaro = (m / len1 as f64 + m / len2 as f64 + (m - transpositions as f64 / 2.0) / m) / 3.0;

    let prefix_length = s1_chars
        .iter()
        .zip(s2_chars.iter())
        .take(WINKLER_MAX_PREFIX)
        .take_while(|(a, b)| a == b)
        .count();

    jaro + WINKLER_PREFIX_SCALE * prefix_length as f64 * (1.0 - jaro)
}

/// Edit-distance similarity after sorting each side's tokens, so word order is ignored.
pub fn token_sort_similarity(s1: &str, s2: &str) -> f64 {
    levenshtein_similarity(&sorted_tokens(s1), &sorted_tokens(s2))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_levenshtein_similarity() {
        assert!(approx(levenshtein_similarity("kitten", "sitting"), 1.0 - 3.0 / 7.0));
        assert_eq!(levenshtein_similarity("acme", "acme"), 1.0);
        assert_eq!(levenshtein_similarity("", ""), 1.0);
        assert_eq!(levenshtein_similarity("", "acme"), 0.0);
        assert_eq!(levenshtein_similarity("acme", ""), 0.0);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert!(approx(levenshtein_similarity("müller", "muller"), 1.0 - 1.0 / 6.0));
    }

    #[test]
    fn test_jaro_winkler_reference_values() {
        assert!(approx(jaro_winkler_similarity("martha", "marhta"), 0.9611));
        assert!(approx(jaro_winkler_similarity("dixon", "dicksonx"), 0.8133));
        assert!(approx(jaro_winkler_similarity("dwayne", "duane"), 0.84));
    }

    #[test]
    fn test_jaro_winkler_edges() {
        assert_eq!(jaro_winkler_similarity("", ""), 1.0);
        assert_eq!(jaro_winkler_similarity("acme", "acme"), 1.0);
        assert_eq!(jaro_winkler_similarity("", "acme"), 0.0);
        assert_eq!(jaro_winkler_similarity("abc", "xyz"), 0.0);
        // window radius floors at zero for very short strings
        assert_eq!(jaro_winkler_similarity("a", "b"), 0.0);
        assert!(approx(jaro_winkler_similarity("ab", "ba"), 0.0));
    }

    #[test]
    fn test_jaro_winkler_boost_applies_below_common_floor() {
        // jaro = (2/5 + 2/5 + 1) / 3 = 0.6, prefix 2 -> 0.6 + 0.2 * 0.4
        assert!(approx(jaro_winkler_similarity("abxyz", "abqrs"), 0.68));
    }

    #[test]
    fn test_token_sort_ignores_word_order() {
        assert_eq!(
            token_sort_similarity("global technology solutions", "technology solutions global"),
            1.0
        );
        assert_eq!(token_sort_similarity("", ""), 1.0);
        assert_eq!(token_sort_similarity("", "acme"), 0.0);
    }

    #[test]
    fn test_combined_is_max_of_metrics() {
        let breakdown = similarity_breakdown("tech solutions global", "global tech solutions");
        assert_eq!(breakdown.token_sort, 1.0);
        assert!(breakdown.levenshtein < 1.0);
        assert_eq!(breakdown.combined(), 1.0);

        let a = NormalizedName::from_tokens(vec!["apple".into()]);
        let b = NormalizedName::from_tokens(vec!["microsoft".into()]);
        let score = calculate_similarity(&a, &b);
        assert!(score < 0.5, "unexpected score {}", score);
    }

    #[test]
    fn test_empty_names_never_similar_to_non_empty() {
        let empty = NormalizedName::empty();
        let acme = NormalizedName::from_tokens(vec!["acme".into()]);
        assert_eq!(calculate_similarity(&empty, &acme), 0.0);
        assert_eq!(calculate_similarity(&acme, &empty), 0.0);
        assert_eq!(calculate_similarity(&empty, &empty), 1.0);
    }
}
