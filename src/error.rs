//! Error types shared by the index, the spellchecker and the loaders.

use thiserror::Error;

/// Errors reported by `bkspell` operations.
///
/// All variants are local and recoverable: a failed call leaves every
/// previously built structure untouched and returns no partial result.
#[derive(Error, Debug)]
pub enum SpellError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] confy::ConfyError),
}

pub type Result<T> = std::result::Result<T, SpellError>;

/// Convert a signed, caller-supplied distance into a usable bound.
///
/// Distances arrive signed from configuration files and the command line;
/// a negative value is rejected rather than clamped.
pub fn validate_distance(distance: i64) -> Result<usize> {
    usize::try_from(distance).map_err(|_| {
        SpellError::InvalidArgument(format!(
            "distance must be non-negative, got {distance}"
        ))
    })
}
