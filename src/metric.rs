//! Distance functions usable as the metric of a [`MetricTree`](crate::MetricTree).
//!
//! Any `Fn(&str, &str) -> usize` is a [`Metric`], so callers can plug in
//! their own distance. Range queries are only complete when the function
//! is a true metric:
//! - `distance(x, x) == 0`
//! - `distance(x, y) == distance(y, x)`
//! - `distance(x, z) <= distance(x, y) + distance(y, z)`
//!
//! None of this is checked at runtime. A function that breaks the triangle
//! inequality still builds a well-formed tree, but `find` may silently miss
//! matches.
//!
//! # Damerau-Levenshtein
//!
//! The default metric is the *unrestricted* Damerau-Levenshtein distance.
//! The cheaper "optimal string alignment" variant, which forbids editing a
//! substring more than once, is not a metric: `osa("ca", "abc") == 3` while
//! `osa("ca", "ac") + osa("ac", "abc") == 2`.

use ahash::AHashMap;

/// A distance between two strings.
pub trait Metric {
    fn distance(&self, a: &str, b: &str) -> usize;
}

impl<F> Metric for F
where
    F: Fn(&str, &str) -> usize,
{
    fn distance(&self, a: &str, b: &str) -> usize {
        self(a, b)
    }
}

/// Unrestricted Damerau-Levenshtein distance over Unicode scalar values.
///
/// Counts insertions, deletions, substitutions and transpositions of
/// adjacent characters, each at cost 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct DamerauLevenshtein;

impl Metric for DamerauLevenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        let source: Vec<char> = a.chars().collect();
        let target: Vec<char> = b.chars().collect();
        let len1 = source.len();
        let len2 = target.len();

        if len1 == 0 {
            return len2;
        }
        if len2 == 0 {
            return len1;
        }

        // Matrix has one extra sentinel row and column holding `infinity`,
        // so cell (i, j) of the textbook formulation lives at (i + 1, j + 1).
        let infinity = len1 + len2;
        let width = len2 + 2;
        let mut matrix = vec![0usize; (len1 + 2) * width];

        matrix[0] = infinity;
        for i in 0..=len1 {
            matrix[(i + 1) * width] = infinity;
            matrix[(i + 1) * width + 1] = i;
        }
        for j in 0..=len2 {
            matrix[j + 1] = infinity;
            matrix[width + j + 1] = j;
        }

        // Last row in which each character of `source` was seen.
        let mut last_row: AHashMap<char, usize> = AHashMap::new();

        for i in 1..=len1 {
            let mut last_match_col = 0;

            for j in 1..=len2 {
                let k = last_row.get(&target[j - 1]).copied().unwrap_or(0);
                let l = last_match_col;

                let cost = if source[i - 1] == target[j - 1] {
                    last_match_col = j;
                    0
                } else {
                    1
                };

                let substitution = matrix[i * width + j] + cost;
                let insertion = matrix[(i + 1) * width + j] + 1;
                let deletion = matrix[i * width + j + 1] + 1;
                let transposition = matrix[k * width + l] + (i - k - 1) + 1 + (j - l - 1);

                matrix[(i + 1) * width + j + 1] = substitution
                    .min(insertion)
                    .min(deletion)
                    .min(transposition);
            }

            last_row.insert(source[i - 1], i);
        }

        matrix[(len1 + 1) * width + len2 + 1]
    }
}

/// Classic Levenshtein distance: insertions, deletions and substitutions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl Metric for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        let source: Vec<char> = a.chars().collect();
        let target: Vec<char> = b.chars().collect();

        if source.is_empty() {
            return target.len();
        }
        if target.is_empty() {
            return source.len();
        }

        let mut previous: Vec<usize> = (0..=target.len()).collect();
        let mut current = vec![0usize; target.len() + 1];

        for (i, &sc) in source.iter().enumerate() {
            current[0] = i + 1;
            for (j, &tc) in target.iter().enumerate() {
                let cost = usize::from(sc != tc);
                current[j + 1] = (previous[j] + cost)
                    .min(previous[j + 1] + 1)
                    .min(current[j] + 1);
            }
            std::mem::swap(&mut previous, &mut current);
        }

        previous[target.len()]
    }
}
