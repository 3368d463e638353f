use crate::error::{validate_distance, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

const APP_NAME: &str = "bkspell";
const CONFIG_NAME: &str = "config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default edit distance for corrections. Signed so a bad value in the
    /// file is reported instead of failing to deserialize.
    pub max_distance: i64,
    /// Seed for the corpus shuffle; `None` picks a fresh one per run.
    pub shuffle_seed: Option<u64>,
    pub corpus_path: Option<PathBuf>,
    /// Treat the corpus as a `word count` list instead of free text.
    pub frequency_list: bool,
    pub lowercase: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_distance: crate::spellcheck::DEFAULT_MAX_DISTANCE as i64,
            shuffle_seed: None,
            corpus_path: crate::corpus::default_corpus_path(),
            frequency_list: false,
            lowercase: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        match confy::load(APP_NAME, Some(CONFIG_NAME)) {
            Ok(config) => Ok(config),
            Err(err) => {
                warn!(error = %err, "Failed to load config, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        confy::store(APP_NAME, Some(CONFIG_NAME), self)?;
        Ok(())
    }

    /// `max_distance`, checked to be non-negative.
    pub fn max_distance(&self) -> Result<usize> {
        validate_distance(self.max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpellError;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_distance().unwrap(), 1);
        assert!(config.lowercase);
        assert!(!config.frequency_list);
    }

    #[test]
    fn test_negative_distance_rejected() {
        let config = Config {
            max_distance: -2,
            ..Config::default()
        };
        assert!(matches!(
            config.max_distance(),
            Err(SpellError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_store_and_load_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            max_distance: 2,
            shuffle_seed: Some(9),
            corpus_path: Some(PathBuf::from("words.txt")),
            frequency_list: true,
            lowercase: false,
        };

        confy::store_path(&path, &config).unwrap();
        let loaded: Config = confy::load_path(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
