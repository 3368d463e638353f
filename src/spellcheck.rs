//! Frequency-ranked spellchecking on top of a [`MetricTree`].
//!
//! A [`Spellcheck`] is built once from a corpus and is read-only afterwards:
//! - `known`: every distinct corpus string, for exact membership tests
//! - `frequency`: occurrence count per string (absent means 0)
//! - `index`: a BK-tree over the corpus for range queries
//!
//! The corpus is shuffled before the tree is built. Sorted word lists
//! otherwise produce long chains of near-identical pivots.
//!
//! # Ranking
//!
//! Candidates from [`Spellcheck::get_corrections`] are ordered by:
//! 1. the query itself, when it is a candidate
//! 2. descending corpus frequency
//! 3. ascending lexicographic order, so equal frequencies rank the same
//!    way on every run

use crate::bktree::MetricTree;
use crate::edits;
use crate::error::{Result, SpellError};
use crate::metric::{DamerauLevenshtein, Metric};
use ahash::{AHashMap, AHashSet};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use tracing::debug;

/// Default `max_distance` for corrections.
pub const DEFAULT_MAX_DISTANCE: usize = 1;

/// A ranked correction candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub term: String,
    pub distance: usize,
    pub frequency: u64,
}

impl Suggestion {
    fn new(term: String, distance: usize, frequency: u64) -> Self {
        Self {
            term,
            distance,
            frequency,
        }
    }
}

/// Membership, frequency and fuzzy lookup over a fixed corpus.
pub struct Spellcheck<M = DamerauLevenshtein> {
    known: AHashSet<String>,
    frequency: AHashMap<String, u64>,
    index: MetricTree<M>,
    total_words: u64,
}

impl Spellcheck<DamerauLevenshtein> {
    /// Build from `corpus` with the default Damerau-Levenshtein metric.
    pub fn new<I>(corpus: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::with_metric(corpus, DamerauLevenshtein)
    }
}

impl<M: Metric> Spellcheck<M> {
    /// Build from `corpus` using `metric` for the index.
    pub fn with_metric<I>(corpus: I, metric: M) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::with_rng(corpus, metric, &mut rand::thread_rng())
    }

    /// Build from `corpus`, shuffling with `rng`.
    ///
    /// A seeded `rng` reproduces the same tree shape across runs. Query
    /// results do not depend on it.
    pub fn with_rng<I, R>(corpus: I, metric: M, rng: &mut R) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        R: Rng + ?Sized,
    {
        let mut words: Vec<String> = corpus.into_iter().map(Into::into).collect();
        words.shuffle(rng);

        let mut frequency: AHashMap<String, u64> = AHashMap::new();
        for word in &words {
            *frequency.entry(word.clone()).or_insert(0) += 1;
        }

        let known: AHashSet<String> = frequency.keys().cloned().collect();
        let total_words = words.len() as u64;
        let index = MetricTree::build(words, metric);

        debug!(
            distinct = known.len(),
            total = total_words,
            "Built spellcheck"
        );

        Self {
            known,
            frequency,
            index,
            total_words,
        }
    }

    /// Build from pre-counted `(word, count)` pairs.
    ///
    /// Counts for a repeated word are summed. Pairs with a zero count are
    /// ignored, since a stored frequency is always positive.
    pub fn from_frequencies<I, S>(pairs: I, metric: M) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self::from_frequencies_with_rng(pairs, metric, &mut rand::thread_rng())
    }

    /// [`from_frequencies`](Self::from_frequencies) with a caller-chosen
    /// shuffle.
    pub fn from_frequencies_with_rng<I, S, R>(pairs: I, metric: M, rng: &mut R) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
        R: Rng + ?Sized,
    {
        let mut frequency: AHashMap<String, u64> = AHashMap::new();
        for (word, count) in pairs {
            if count > 0 {
                *frequency.entry(word.into()).or_insert(0) += count;
            }
        }

        let mut words: Vec<String> = frequency.keys().cloned().collect();
        words.shuffle(rng);

        let known: AHashSet<String> = words.iter().cloned().collect();
        let total_words: u64 = frequency.values().sum();
        let index = MetricTree::build(words, metric);

        debug!(
            distinct = known.len(),
            total = total_words,
            "Built spellcheck from frequency list"
        );

        Self {
            known,
            frequency,
            index,
            total_words,
        }
    }

    /// Whether `word` occurs in the corpus, exactly and case-sensitively.
    pub fn is_correct(&self, word: &str) -> bool {
        self.known.contains(word)
    }

    /// Number of occurrences of `word` in the corpus.
    pub fn frequency(&self, word: &str) -> u64 {
        self.frequency.get(word).copied().unwrap_or(0)
    }

    /// Ranked corpus words within `max_distance` of `word`.
    ///
    /// # Errors
    /// Returns [`SpellError::InvalidArgument`] when `word` is empty, even if
    /// the corpus itself contains `""`. Use [`is_correct`](Self::is_correct)
    /// or [`MetricTree::find`] on [`index`](Self::index) to query it.
    pub fn get_corrections(&self, word: &str, max_distance: usize) -> Result<Vec<String>> {
        Ok(self
            .lookup(word, max_distance)?
            .into_iter()
            .map(|suggestion| suggestion.term)
            .collect())
    }

    /// Like [`get_corrections`](Self::get_corrections), with the distance and
    /// frequency of each candidate.
    pub fn lookup(&self, word: &str, max_distance: usize) -> Result<Vec<Suggestion>> {
        if word.is_empty() {
            return Err(SpellError::InvalidArgument(
                "query word must not be empty".to_string(),
            ));
        }

        let mut suggestions: Vec<Suggestion> = self
            .index
            .find_with_distance(word, max_distance)
            .into_iter()
            .map(|(distance, term)| {
                Suggestion::new(term.to_string(), distance, self.frequency(term))
            })
            .collect();

        suggestions.sort_by(|a, b| {
            rank(
                word,
                (a.term.as_str(), a.frequency),
                (b.term.as_str(), b.frequency),
            )
        });
        Ok(suggestions)
    }

    /// The preferred replacement for a misspelled `word`.
    ///
    /// Returns `None` when `word` is already correct or nothing in the corpus
    /// is within `max_distance`.
    pub fn best_correction(&self, word: &str, max_distance: usize) -> Option<String> {
        if word.is_empty() || self.is_correct(word) {
            return None;
        }

        self.lookup(word, max_distance)
            .ok()?
            .into_iter()
            .next()
            .map(|suggestion| suggestion.term)
    }

    /// Corpus words reachable from `word` within `distance` character edits,
    /// found by enumerating edits rather than searching the tree.
    ///
    /// Ranked like [`get_corrections`](Self::get_corrections) and
    /// deduplicated. Only practical for `distance <= 2`.
    pub fn known_edits(&self, word: &str, distance: usize) -> Vec<String> {
        let mut seen = AHashSet::new();
        let mut found: Vec<String> = edits::edits_with_max_distance(word, distance)
            .into_iter()
            .flatten()
            .filter(|candidate| self.is_correct(candidate))
            .filter(|candidate| seen.insert(candidate.clone()))
            .collect();

        found.sort_by(|a, b| {
            rank(
                word,
                (a.as_str(), self.frequency(a)),
                (b.as_str(), self.frequency(b)),
            )
        });
        found
    }

    /// See [`edits::edits`].
    pub fn edits(&self, word: &str) -> AHashSet<String> {
        edits::edits(word)
    }

    /// See [`edits::edits_with_max_distance`].
    pub fn edits_with_max_distance(&self, word: &str, distance: usize) -> Vec<Vec<String>> {
        edits::edits_with_max_distance(word, distance)
    }

    /// Number of distinct corpus words.
    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Number of corpus words, counting repeats.
    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    pub fn index(&self) -> &MetricTree<M> {
        &self.index
    }
}

fn rank(query: &str, a: (&str, u64), b: (&str, u64)) -> Ordering {
    let (a_term, a_frequency) = a;
    let (b_term, b_frequency) = b;

    match (a_term == query, b_term == query) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    match b_frequency.cmp(&a_frequency) {
        Ordering::Equal => a_term.cmp(b_term),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Levenshtein;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Spellcheck {
        Spellcheck::new(["cat", "cat", "cot", "bat"])
    }

    #[test]
    fn test_is_correct() {
        let spellcheck = sample();
        assert!(spellcheck.is_correct("cat"));
        assert!(spellcheck.is_correct("bat"));
        assert!(!spellcheck.is_correct("Cat"));
        assert!(!spellcheck.is_correct("ca"));
        assert!(!spellcheck.is_correct(""));
    }

    #[test]
    fn test_frequency() {
        let spellcheck = sample();
        assert_eq!(spellcheck.frequency("cat"), 2);
        assert_eq!(spellcheck.frequency("cot"), 1);
        assert_eq!(spellcheck.frequency("dog"), 0);
        assert_eq!(spellcheck.len(), 3);
        assert_eq!(spellcheck.total_words(), 4);
    }

    #[test]
    fn test_corrections_ranking() {
        let spellcheck = sample();
        let corrections = spellcheck.get_corrections("cat", 1).unwrap();
        assert_eq!(corrections, vec!["cat", "bat", "cot"]);
    }

    #[test]
    fn test_corrections_by_frequency() {
        let spellcheck = Spellcheck::new(["hello", "hell", "hell", "hell", "help", "help", "world"]);
        let corrections = spellcheck.get_corrections("helo", 1).unwrap();
        assert_eq!(corrections, vec!["hell", "help", "hello"]);
    }

    #[test]
    fn test_self_priority() {
        let mut corpus = vec!["rare".to_string()];
        corpus.extend(std::iter::repeat("care".to_string()).take(10));
        corpus.extend(std::iter::repeat("bare".to_string()).take(5));
        let spellcheck = Spellcheck::new(corpus);

        for max_distance in 0..=3 {
            let corrections = spellcheck.get_corrections("rare", max_distance).unwrap();
            assert_eq!(corrections[0], "rare");
        }
        assert_eq!(
            spellcheck.get_corrections("rare", 1).unwrap(),
            vec!["rare", "care", "bare"]
        );
    }

    #[test]
    fn test_lookup_reports_distance_and_frequency() {
        let spellcheck = sample();
        let suggestions = spellcheck.lookup("cart", 1).unwrap();
        assert_eq!(suggestions, vec![Suggestion::new("cat".to_string(), 1, 2)]);
    }

    #[test]
    fn test_empty_query_is_rejected() {
        let spellcheck = sample();
        assert!(matches!(
            spellcheck.get_corrections("", 1),
            Err(SpellError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_query_rejected_even_when_in_corpus() {
        let spellcheck = Spellcheck::new(["", "a"]);
        assert!(spellcheck.is_correct(""));
        assert!(matches!(
            spellcheck.get_corrections("", 1),
            Err(SpellError::InvalidArgument(_))
        ));
        assert_eq!(spellcheck.index().find("", 0), vec![""]);
    }

    #[test]
    fn test_empty_corpus() {
        let spellcheck = Spellcheck::new(Vec::<String>::new());
        assert!(spellcheck.is_empty());
        assert!(!spellcheck.is_correct("anything"));
        assert!(spellcheck.get_corrections("anything", 3).unwrap().is_empty());
        assert_eq!(spellcheck.best_correction("anything", 3), None);
    }

    #[test]
    fn test_best_correction() {
        let spellcheck = Spellcheck::new(["the", "the", "then", "they"]);
        assert_eq!(spellcheck.best_correction("teh", 1), Some("the".to_string()));
        assert_eq!(spellcheck.best_correction("the", 1), None);
        assert_eq!(spellcheck.best_correction("xyzzy", 1), None);
    }

    #[test]
    fn test_seeded_build_is_reproducible() {
        let corpus = ["alpha", "beta", "gamma", "delta", "alpha", "epsilon"];
        let first = Spellcheck::with_rng(corpus, DamerauLevenshtein, &mut StdRng::seed_from_u64(3));
        let second = Spellcheck::with_rng(corpus, DamerauLevenshtein, &mut StdRng::seed_from_u64(3));
        assert_eq!(first.index().values(), second.index().values());
        assert_eq!(first.index().len(), 5);
    }

    #[test]
    fn test_custom_metric() {
        let spellcheck = Spellcheck::with_metric(["ab", "ba", "abc"], Levenshtein);
        // Levenshtein counts a swap as two edits.
        assert_eq!(spellcheck.get_corrections("ab", 1).unwrap(), vec!["ab", "abc"]);
    }

    #[test]
    fn test_from_frequencies() {
        let spellcheck = Spellcheck::from_frequencies(
            [("the", 100), ("then", 40), ("they", 40), ("thy", 0), ("the", 5)],
            DamerauLevenshtein,
        );
        assert_eq!(spellcheck.frequency("the"), 105);
        assert!(!spellcheck.is_correct("thy"));
        assert_eq!(spellcheck.total_words(), 185);
        assert_eq!(
            spellcheck.get_corrections("thex", 1).unwrap(),
            vec!["the", "then", "they"]
        );
    }

    #[test]
    fn test_known_edits_matches_tree() {
        let spellcheck = Spellcheck::new(["cat", "cat", "cot", "bat", "cart", "dog"]);
        assert_eq!(spellcheck.known_edits("cat", 1), vec!["cat", "bat", "cart", "cot"]);
        assert_eq!(
            spellcheck.known_edits("cat", 1),
            spellcheck.get_corrections("cat", 1).unwrap()
        );
    }

    #[test]
    fn test_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Spellcheck>();

        let spellcheck = std::sync::Arc::new(sample());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let spellcheck = std::sync::Arc::clone(&spellcheck);
                std::thread::spawn(move || spellcheck.get_corrections("cot", 1).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec!["cot", "cat"]);
        }
    }

    #[test]
    fn test_edits_delegate() {
        let spellcheck = sample();
        assert_eq!(spellcheck.edits("a").len(), 78);
        assert_eq!(spellcheck.edits_with_max_distance("a", 1)[1].len(), 78);
    }
}
