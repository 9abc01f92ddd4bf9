//! Trigram similarity scoring, compatible with PostgreSQL's `pg_trgm`.
//!
//! A string is lowercased and split into alphanumeric words; each word is
//! padded with two leading spaces and one trailing space before its
//! three-character windows are collected. Similarity is the ratio of
//! shared trigrams to the union of both trigram sets, so identical
//! strings score 1.0 and strings with no trigram in common score 0.0.

use std::collections::HashSet;

/// Similarity between two strings in `0.0..=1.0`.
pub fn similarity(a: &str, b: &str) -> f32 {
    let ta = trigrams(a);
    let tb = trigrams(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let shared = ta.intersection(&tb).count();
    let union = ta.len() + tb.len() - shared;
    shared as f32 / union as f32
}

fn trigrams(s: &str) -> HashSet<String> {
    let mut set = HashSet::new();
    for word in s
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let padded: Vec<char> = ["  ", word, " "].concat().chars().collect();
        for window in padded.windows(3) {
            set.insert(window.iter().collect());
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("word", "word"), 1.0);
        assert_eq!(similarity("Word", "word"), 1.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(similarity("", "word"), 0.0);
        assert_eq!(similarity("word", "  !  "), 0.0);
    }

    #[test]
    fn matches_the_pg_trgm_reference_example() {
        // similarity('word', 'two words') = 0.36363637 in pg_trgm:
        // 4 shared trigrams over a union of 11.
        let score = similarity("word", "two words");
        assert!((score - 4.0 / 11.0).abs() < 1e-6);
    }

    #[test]
    fn word_splitting_ignores_punctuation() {
        assert_eq!(similarity("hello, world", "hello world"), 1.0);
    }
}
