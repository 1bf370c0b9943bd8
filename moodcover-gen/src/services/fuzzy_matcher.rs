//! Fuzzy title/artist matcher
//!
//! Similarity is the Ratcliff/Obershelp ratio `2*M / T`, where `M` counts
//! characters in the matching blocks found by repeatedly taking the
//! longest common substring (left and right of it, recursively) and `T`
//! is the combined length of both strings. Comparison is case-insensitive.

use crate::types::Matchable;

/// Best candidate and its combined score in [0, 2]
#[derive(Debug)]
pub struct FuzzyMatch<'a, T> {
    pub candidate: &'a T,
    pub score: f64,
}

/// Case-insensitive similarity ratio in [0, 1]
///
/// Two empty strings are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Title ratio plus artist ratio
pub fn score<T: Matchable>(title: &str, artist: &str, candidate: &T) -> f64 {
    similarity(candidate.match_title(), title) + similarity(candidate.match_artist(), artist)
}

/// Highest-scoring candidate
///
/// Only a strictly higher score replaces the current best, so ties keep the
/// first candidate seen. Scoring starts from a 0.0 floor: an empty list, or
/// one where nothing shares a character with the target, is no match.
pub fn best_match<'a, T: Matchable>(
    title: &str,
    artist: &str,
    candidates: &'a [T],
) -> Option<FuzzyMatch<'a, T>> {
    let mut best: Option<FuzzyMatch<'a, T>> = None;

    for candidate in candidates {
        let candidate_score = score(title, artist, candidate);
        tracing::trace!(
            title = %candidate.match_title(),
            artist = %candidate.match_artist(),
            score = candidate_score,
            "Scored candidate"
        );

        if candidate_score > best.as_ref().map_or(0.0, |b| b.score) {
            best = Some(FuzzyMatch {
                candidate,
                score: candidate_score,
            });
        }
    }

    best
}

/// Total size of the matching blocks between `a` and `b`
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_common_block(a, alo, ahi, b, blo, bhi);
        if size == 0 {
            continue;
        }
        total += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    total
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]`
///
/// Ties resolve to the block ending earliest in `a`, then earliest in `b`.
fn longest_common_block(
    a: &[char],
    alo: usize,
    ahi: usize,
    b: &[char],
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0);
    // run[j] = length of the common run ending at a[i-1], b[blo + j - 1]
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo + 1;
            curr[col] = if a[i] == b[j] { prev[col - 1] + 1 } else { 0 };
            let run = curr[col];
            if run > best.2 {
                best = (i + 1 - run, j + 1 - run, run);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PreviewCandidate;

    fn candidate(title: &str, artist: &str) -> PreviewCandidate {
        PreviewCandidate {
            title: title.to_string(),
            artist: artist.to_string(),
            preview_url: Some(format!("https://cdn.example/{}.mp3", title)),
        }
    }

    #[test]
    fn test_identical_strings_score_two() {
        let c = candidate("Yesterday", "The Beatles");
        assert_eq!(score("Yesterday", "The Beatles", &c), 2.0);
    }

    #[test]
    fn test_case_is_ignored() {
        let c = candidate("YESTERDAY", "the beatles");
        assert_eq!(score("Yesterday", "The Beatles", &c), 2.0);
    }

    #[test]
    fn test_disjoint_strings_score_zero() {
        let c = candidate("abc", "def");
        assert_eq!(score("xyz", "uvw", &c), 0.0);
    }

    #[test]
    fn test_known_ratios() {
        // "abcd" vs "bcde": block "bcd" → 2*3/8
        assert!((similarity("abcd", "bcde") - 0.75).abs() < 1e-12);
        // two blocks: "ab" and "d" → 2*3/8
        assert!((similarity("abxd", "abyd") - 0.75).abs() < 1e-12);
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("a", ""), 0.0);
    }

    #[test]
    fn test_ratio_symmetric_on_simple_inputs() {
        let pairs = [("let it be", "let it bleed"), ("help", "hello"), ("night", "nacht")];
        for (a, b) in pairs {
            assert!((similarity(a, b) - similarity(b, a)).abs() < 1e-12, "{} / {}", a, b);
        }
    }

    #[test]
    fn test_best_match_picks_highest() {
        let candidates = vec![
            candidate("Yesterday (Remastered)", "The Beatles"),
            candidate("Yesterday", "The Beatles"),
            candidate("Yesterday", "Boyz II Men"),
        ];

        let best = best_match("Yesterday", "The Beatles", &candidates).unwrap();
        assert_eq!(best.candidate.title, "Yesterday");
        assert_eq!(best.candidate.artist, "The Beatles");
        assert_eq!(best.score, 2.0);
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let candidates = vec![
            PreviewCandidate {
                preview_url: Some("first".to_string()),
                ..candidate("Song", "Band")
            },
            PreviewCandidate {
                preview_url: Some("second".to_string()),
                ..candidate("Song", "Band")
            },
        ];

        let best = best_match("Song", "Band", &candidates).unwrap();
        assert_eq!(best.candidate.preview_url.as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_candidates_is_no_match() {
        let candidates: Vec<PreviewCandidate> = Vec::new();
        assert!(best_match("Song", "Band", &candidates).is_none());
    }

    #[test]
    fn test_zero_scores_are_no_match() {
        let candidates = vec![candidate("qqq", "www"), candidate("eee", "rrr")];
        assert!(best_match("zzz", "yyy", &candidates).is_none());
    }

    #[test]
    fn test_any_overlap_beats_the_floor() {
        let candidates = vec![candidate("qqq", "www"), candidate("zqq", "www")];
        let best = best_match("zzz", "yyy", &candidates).unwrap();
        assert_eq!(best.candidate.title, "zqq");
        assert!(best.score > 0.0);
    }

    #[test]
    fn test_deterministic() {
        let candidates = vec![candidate("Hey Jude", "Beatles"), candidate("Hey You", "Pink Floyd")];
        let first = best_match("hey jude", "the beatles", &candidates).unwrap().score;
        let second = best_match("hey jude", "the beatles", &candidates).unwrap().score;
        assert_eq!(first, second);
    }
}
