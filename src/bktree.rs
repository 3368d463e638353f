//! Burkhard-Keller tree over strings.
//!
//! Each node stores one pivot string. Its children are keyed by the *exact*
//! distance from the pivot to every value in the child's subtree, so a range
//! query only has to visit the children whose key lies within `max_distance`
//! of the query's own distance to the pivot (triangle inequality).
//!
//! Traversals and teardown use an explicit stack, so a skewed tree (a corpus
//! with a very narrow distance distribution) costs heap memory instead of
//! native stack.

use crate::metric::{DamerauLevenshtein, Metric};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug)]
struct Node {
    pivot: String,
    /// Child subtrees keyed by their (positive) distance to `pivot`.
    children: BTreeMap<usize, Node>,
}

impl Node {
    fn leaf<M: Metric>(metric: &M, pivot: String) -> Self {
        debug_assert_eq!(
            metric.distance(&pivot, &pivot),
            0,
            "metric must map identical strings to 0"
        );
        Self {
            pivot,
            children: BTreeMap::new(),
        }
    }
}

// The derived drop glue would recurse once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Node> = std::mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}

/// A BK-tree keyed by a pluggable [`Metric`].
///
/// Built in batch, queried many times. There is no removal.
pub struct MetricTree<M = DamerauLevenshtein> {
    root: Option<Node>,
    metric: M,
    len: usize,
}

impl<M: Metric> MetricTree<M> {
    /// Create an empty tree.
    pub fn new(metric: M) -> Self {
        Self {
            root: None,
            metric,
            len: 0,
        }
    }

    /// Build a tree by inserting `words` in iteration order.
    ///
    /// Order only changes the shape of the tree, never query results.
    pub fn build<I>(words: I, metric: M) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut tree = Self::new(metric);
        let mut duplicates = 0usize;
        for word in words {
            if tree.insert(word) {
                duplicates += 1;
            }
        }
        debug!(
            stored = tree.len,
            duplicates,
            depth = tree.depth(),
            "Built metric tree"
        );
        tree
    }

    /// Insert `word`, returning `true` if it was already present.
    ///
    /// Presence is only checked along the word's insertion path: the walk
    /// stops when it reaches a pivot at distance 0. With a true metric an
    /// identical string always retraces the same path, so this detects every
    /// exact duplicate. A function that returns 0 for two *different*
    /// strings makes the second one look present and it is not stored. Use
    /// [`contains`](Self::contains) for a check that does not depend on the
    /// insertion path.
    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        let word = word.into();

        let mut node = match self.root {
            Some(ref mut root) => root,
            None => {
                self.root = Some(Node::leaf(&self.metric, word));
                self.len += 1;
                return false;
            }
        };

        loop {
            let distance = self.metric.distance(&node.pivot, &word);
            if distance == 0 {
                return true;
            }

            match node.children.entry(distance) {
                Entry::Vacant(slot) => {
                    slot.insert(Node::leaf(&self.metric, word));
                    self.len += 1;
                    return false;
                }
                Entry::Occupied(child) => node = child.into_mut(),
            }
        }
    }

    /// All stored values within `max_distance` of `word`.
    ///
    /// Results come in pre-order: a node's pivot (when it matches) before its
    /// children, children by increasing key. Callers wanting a ranking must
    /// sort.
    pub fn find(&self, word: &str, max_distance: usize) -> Vec<&str> {
        self.find_with_distance(word, max_distance)
            .into_iter()
            .map(|(_, value)| value)
            .collect()
    }

    /// Like [`find`](Self::find), paired with each value's distance to `word`.
    pub fn find_with_distance(&self, word: &str, max_distance: usize) -> Vec<(usize, &str)> {
        let mut found = Vec::new();
        let Some(root) = self.root.as_ref() else {
            return found;
        };

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let distance = self.metric.distance(&node.pivot, word);
            if distance <= max_distance {
                found.push((distance, node.pivot.as_str()));
            }

            let low = distance.saturating_sub(max_distance).max(1);
            let high = distance.saturating_add(max_distance);
            if low > high {
                continue;
            }
            // Reversed so the smallest key is popped first.
            stack.extend(node.children.range(low..=high).rev().map(|(_, child)| child));
        }

        found
    }

    /// Whether `word` is stored anywhere in the tree.
    pub fn contains(&self, word: &str) -> bool {
        !self.find(word, 0).is_empty()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels in the longest root-to-leaf path (0 for an empty tree).
    pub fn depth(&self) -> usize {
        let Some(root) = self.root.as_ref() else {
            return 0;
        };

        let mut deepest = 0;
        let mut stack = vec![(root, 1usize)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.values().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Every stored value, in pre-order.
    pub fn values(&self) -> Vec<&str> {
        let mut values = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = self.root.iter().collect();
        while let Some(node) = stack.pop() {
            values.push(node.pivot.as_str());
            stack.extend(node.children.values().rev());
        }
        values
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }
}

impl Default for MetricTree<DamerauLevenshtein> {
    fn default() -> Self {
        Self::new(DamerauLevenshtein)
    }
}

impl<M: Metric, S: Into<String>> Extend<S> for MetricTree<M> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word);
        }
    }
}
