//! Candidate generation by character edits.
//!
//! [`edits`] produces every string one elementary edit away from a word:
//! delete, transpose adjacent characters, replace, insert. Replacements and
//! insertions draw from the fixed lowercase [`ALPHABET`]; the word itself may
//! contain any characters.
//!
//! [`edits_with_max_distance`] applies [`edits`] repeatedly. Layer sizes grow
//! by a factor of roughly `54 * len + 25` per step, so anything beyond
//! distance 2 is expensive. Prefer [`Spellcheck::get_corrections`] for
//! correction; this is a tree-free enumeration for small distances.
//!
//! [`Spellcheck::get_corrections`]: crate::Spellcheck::get_corrections

use ahash::AHashSet;
use tracing::debug;

/// Letters used for replacements and insertions.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// All distinct strings one edit away from `word`.
///
/// For a word of `n` characters, walks every boundary `i` in `0..=n`:
/// - delete character `i - 1` (when `i > 0`)
/// - swap characters `i - 1` and `i` (when `i > 0`; at `i == n` there is
///   nothing to swap with and the word itself is produced)
/// - replace character `i - 1` with each letter (when `i > 0`)
/// - insert each letter before position `i`
///
/// The result may contain `word` itself, e.g. when a replacement writes back
/// the same letter.
pub fn edits(word: &str) -> AHashSet<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut out = AHashSet::with_capacity(n * 54 + 26);

    let join = |parts: &[&[char]]| -> String { parts.iter().flat_map(|p| p.iter()).collect() };

    for i in 0..=n {
        let (head, tail) = chars.split_at(i);

        if i > 0 {
            let prefix = &head[..i - 1];

            out.insert(join(&[prefix, tail]));

            if i < n {
                out.insert(join(&[prefix, &[chars[i], chars[i - 1]], &tail[1..]]));
            } else {
                out.insert(word.to_string());
            }

            for letter in ALPHABET.chars() {
                out.insert(join(&[prefix, &[letter], tail]));
            }
        }

        for letter in ALPHABET.chars() {
            out.insert(join(&[head, &[letter], tail]));
        }
    }

    out
}

/// Layered expansion of [`edits`] up to `distance` steps.
///
/// Layer 0 is `[word]`; layer `k` concatenates `edits(s)` for every `s` in
/// layer `k - 1`. Duplicates *across* sources are kept (the same string may
/// be reachable from several parents), while each source's own edits are
/// distinct and appended in sorted order so layers are reproducible.
pub fn edits_with_max_distance(word: &str, distance: usize) -> Vec<Vec<String>> {
    let mut layers = Vec::with_capacity(distance + 1);
    layers.push(vec![word.to_string()]);

    for depth in 1..=distance {
        let previous = &layers[depth - 1];
        let mut next = Vec::new();
        for source in previous {
            let mut neighbours: Vec<String> = edits(source).into_iter().collect();
            neighbours.sort_unstable();
            next.extend(neighbours);
        }
        debug!(word, depth, size = next.len(), "Expanded edit layer");
        layers.push(next);
    }

    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{DamerauLevenshtein, Metric};

    fn letters() -> impl Iterator<Item = char> {
        ALPHABET.chars()
    }

    #[test]
    fn test_edits_single_letter() {
        let result = edits("a");

        let mut expected = AHashSet::new();
        expected.insert(String::new());
        for c in letters() {
            expected.insert(c.to_string());
            expected.insert(format!("{c}a"));
            expected.insert(format!("a{c}"));
        }

        assert_eq!(result.len(), 78);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_edits_empty_word() {
        let result = edits("");
        assert_eq!(result.len(), 26);
        assert!(letters().all(|c| result.contains(&c.to_string())));
    }

    #[test]
    fn test_edits_contains_each_kind() {
        let result = edits("cat");
        assert!(result.contains("at")); // delete
        assert!(result.contains("ct"));
        assert!(result.contains("ca"));
        assert!(result.contains("act")); // transpose
        assert!(result.contains("cta"));
        assert!(result.contains("bat")); // replace
        assert!(result.contains("cot"));
        assert!(result.contains("car"));
        assert!(result.contains("scat")); // insert
        assert!(result.contains("cart"));
        assert!(result.contains("cats"));
        assert!(result.contains("cat"));
        assert!(!result.contains("tac"));
    }

    #[test]
    fn test_edits_count_two_letters() {
        // 2 deletes, 1 distinct transpose, replacements and inserts.
        // "ab": deletes {b, a}; transpose {ba}; replace 26 + 26 with "ab"
        // shared; inserts 3 * 26 minus the overlaps "aab" and "abb".
        let result = edits("ab");
        assert_eq!(result.len(), 2 + 1 + 51 + 76);
    }

    #[test]
    fn test_edits_are_within_one_edit() {
        let dl = DamerauLevenshtein;
        for word in ["spell", "ab", "zz", "q"] {
            for candidate in edits(word) {
                assert!(dl.distance(word, &candidate) <= 1, "{word} -> {candidate}");
            }
        }
    }

    #[test]
    fn test_edits_keep_non_alphabet_characters() {
        let result = edits("é");
        assert!(result.contains("aé"));
        assert!(result.contains(""));
        assert!(result.contains("é"));
    }

    #[test]
    fn test_edits_with_max_distance_layers() {
        let layers = edits_with_max_distance("a", 1);
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0], vec!["a".to_string()]);
        assert_eq!(layers[1].len(), 78);

        let as_set: AHashSet<String> = layers[1].iter().cloned().collect();
        assert_eq!(as_set, edits("a"));
    }

    #[test]
    fn test_edits_with_max_distance_zero() {
        assert_eq!(edits_with_max_distance("word", 0), vec![vec!["word".to_string()]]);
    }

    #[test]
    fn test_edits_with_max_distance_keeps_duplicates_across_sources() {
        let layers = edits_with_max_distance("a", 2);
        let expected: usize = layers[1].iter().map(|s| edits(s).len()).sum();
        assert_eq!(layers[2].len(), expected);

        let distinct: AHashSet<&String> = layers[2].iter().collect();
        assert!(distinct.len() < layers[2].len());
    }

    #[test]
    fn test_edits_with_max_distance_is_deterministic() {
        assert_eq!(
            edits_with_max_distance("ab", 2),
            edits_with_max_distance("ab", 2)
        );
    }
}
