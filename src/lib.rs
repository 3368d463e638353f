//! bkspell - approximate string lookup and spellchecking.
//!
//! # Overview
//!
//! - [`MetricTree`]: a BK-tree answering "which stored strings are within
//!   distance `k` of this query?" while skipping subtrees the triangle
//!   inequality rules out.
//! - [`Spellcheck`]: a corpus-backed checker that tests membership and ranks
//!   corrections by how often each candidate occurs in the corpus.
//! - [`edits`]: enumeration of strings one or more character edits away.
//!
//! # Architecture
//!
//! ```text
//! corpus ──shuffle──┬──▶ MetricTree (index)
//!                   ├──▶ known set
//!                   └──▶ frequency table
//!
//! query ──▶ MetricTree::find ──▶ candidates ──rank──▶ suggestions
//! ```
//!
//! Everything is built once and only read afterwards, so a built
//! [`Spellcheck`] can be shared between threads without locking.
//!
//! # Example
//!
//! ```rust
//! use bkspell::Spellcheck;
//!
//! let spellcheck = Spellcheck::new(["cat", "cat", "cot", "bat"]);
//! assert!(spellcheck.is_correct("cat"));
//! assert_eq!(
//!     spellcheck.get_corrections("cat", 1).unwrap(),
//!     vec!["cat", "bat", "cot"]
//! );
//! ```

pub mod bktree;
pub mod config;
pub mod corpus;
pub mod edits;
pub mod error;
pub mod metric;
pub mod spellcheck;

pub use bktree::MetricTree;
pub use config::Config;
pub use error::{Result, SpellError};
pub use metric::{DamerauLevenshtein, Levenshtein, Metric};
pub use spellcheck::{Spellcheck, Suggestion, DEFAULT_MAX_DISTANCE};
