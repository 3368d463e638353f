//! Corpus loading.
//!
//! Two input formats are understood:
//!
//! **Free text**: any prose. Words are runs of alphabetic characters; every
//! occurrence counts toward the word's frequency.
//!
//! **Frequency list**: one word per line with an optional count:
//! ```text
//! # Comments start with #
//! the 1000000
//! hello 15000
//! world
//! ```
//! A missing count defaults to 1.

use crate::error::{Result, SpellError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Split `text` into words, optionally lowercased.
pub fn tokenize(text: &str, lowercase: bool) -> Vec<String> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|token| !token.is_empty())
        .map(|token| {
            if lowercase {
                token.to_lowercase()
            } else {
                token.to_string()
            }
        })
        .collect()
}

/// Parse a frequency list into `(word, count)` pairs.
///
/// # Errors
/// Returns [`SpellError::Parse`] for a count that is not a non-negative
/// integer.
pub fn parse_frequency_list(text: &str) -> Result<Vec<(String, u64)>> {
    let mut entries = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            continue;
        };

        let count = match parts.next() {
            Some(raw) => raw.parse::<u64>().map_err(|err| SpellError::Parse {
                line: index + 1,
                message: format!("invalid count {raw:?} for {word:?}: {err}"),
            })?,
            None => 1,
        };

        entries.push((word.to_string(), count));
    }

    Ok(entries)
}

/// Read a free-text corpus from `path`.
pub fn load_text(path: &Path, lowercase: bool) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let words = tokenize(&text, lowercase);
    info!(path = %path.display(), words = words.len(), "Loaded text corpus");
    Ok(words)
}

/// Read a frequency list from `path`.
pub fn load_frequency_list(path: &Path) -> Result<Vec<(String, u64)>> {
    let text = fs::read_to_string(path)?;
    let entries = parse_frequency_list(&text)?;
    info!(path = %path.display(), entries = entries.len(), "Loaded frequency list");
    Ok(entries)
}

/// `<data dir>/bkspell/corpus.txt`, where the data directory is the
/// platform's per-user application data folder.
pub fn default_corpus_path() -> Option<PathBuf> {
    dirs::data_dir().map(|mut path| {
        path.push("bkspell");
        path.push("corpus.txt");
        path
    })
}
