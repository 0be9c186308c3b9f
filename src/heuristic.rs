//! Similarity oracle: a pluggable `sim(a, b) -> [0, 1]` used by A* and
//! informed bidirectional search to steer expansion toward the target.
//!
//! The built-in [`LexicalOverlap`] implementation is the cheap, always-
//! available default described as living alongside the engine itself; a
//! heavier TF-IDF/SVD/cosine oracle over full article text is a distinct,
//! external concern this crate only needs to be pluggable against, not
//! implement.

use crate::page::PageId;
use std::collections::HashSet;

/// A similarity/closeness oracle between two pages, used as the heuristic
/// `h(n)` in A* (`h = 1 - sim`) and as the priority key in informed
/// bidirectional search.
pub trait Similarity: Send + Sync {
    /// Returns a similarity score in `[0, 1]`; `1.0` means "as close as
    /// possible" (typically an exact title match), `0.0` means unrelated.
    fn score(&self, a: &PageId, b: &PageId) -> f64;
}

/// Token-overlap similarity over article titles: the Jaccard index of the
/// two titles' lowercased word sets, with an exact-title match short-
/// circuiting to `1.0`. This is a coarse proxy for semantic relatedness,
/// deliberately cheap enough to compute for every frontier push without any
/// network access or corpus fitting.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicalOverlap;

impl Similarity for LexicalOverlap {
    fn score(&self, a: &PageId, b: &PageId) -> f64 {
        if a == b {
            return 1.0;
        }

        let tokens_a = title_tokens(a);
        let tokens_b = title_tokens(b);

        if tokens_a.is_empty() || tokens_b.is_empty() {
            return 0.0;
        }

        let intersection = tokens_a.intersection(&tokens_b).count();
        let union = tokens_a.union(&tokens_b).count();

        if union == 0 {
            0.0
        } else {
            intersection as f64 / union as f64
        }
    }
}

fn title_tokens(page: &PageId) -> HashSet<String> {
    page.title()
        .to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str) -> PageId {
        PageId::parse(title).unwrap()
    }

    #[test]
    fn identical_pages_score_one() {
        let p = page("Rust (programming language)");
        assert_eq!(LexicalOverlap.score(&p, &p), 1.0);
    }

    #[test]
    fn shared_words_raise_the_score() {
        let a = page("Programming language");
        let b = page("Programming paradigm");
        let c = page("Bicycle");
        let overlap = LexicalOverlap;
        assert!(overlap.score(&a, &b) > overlap.score(&a, &c));
    }

    #[test]
    fn disjoint_titles_score_zero() {
        let a = page("Rust");
        let b = page("Bicycle");
        assert_eq!(LexicalOverlap.score(&a, &b), 0.0);
    }
}
