//! bkspell - command-line front end for the `bkspell` library.
//!
//! Loads a corpus (free text or a `word count` frequency list), builds a
//! [`Spellcheck`] over it and answers one query per invocation. Settings not
//! given on the command line come from the persisted config file.

use bkspell::corpus;
use bkspell::error::validate_distance;
use bkspell::{Config, DamerauLevenshtein, Spellcheck};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bkspell")]
#[command(about = "Fuzzy lookup and spellchecking over a word corpus")]
#[command(version)]
struct Args {
    /// Corpus file path
    #[arg(short, long)]
    corpus: Option<PathBuf>,

    /// Read the corpus as `word count` lines instead of free text
    #[arg(long)]
    frequency_list: bool,

    /// Seed for the corpus shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Keep corpus words in their original case
    #[arg(long)]
    no_lowercase: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report whether each word is in the corpus
    Check { words: Vec<String> },
    /// List ranked corrections for a word
    Correct {
        word: String,
        /// Maximum edit distance
        #[arg(short = 'd', long, allow_negative_numbers = true)]
        max_distance: Option<i64>,
    },
    /// Enumerate strings within a number of character edits
    Edits {
        word: String,
        #[arg(short = 'd', long, default_value_t = 1, allow_negative_numbers = true)]
        distance: i64,
        /// Print every generated string, not just layer sizes
        #[arg(long)]
        print: bool,
    },
    /// Print corpus statistics
    Stats,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bkspell=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::load()?;

    // Persist defaults so users get a concrete config file on first run.
    if let Err(err) = config.save() {
        warn!(error = %err, "Failed to persist config defaults");
    }

    if args.corpus.is_some() {
        config.corpus_path = args.corpus.clone();
    }
    if args.frequency_list {
        config.frequency_list = true;
    }
    if args.no_lowercase {
        config.lowercase = false;
    }
    if args.seed.is_some() {
        config.shuffle_seed = args.seed;
    }

    // Edit generation needs no corpus.
    if let Command::Edits {
        word,
        distance,
        print,
    } = &args.command
    {
        let distance = validate_distance(*distance)?;
        let layers = bkspell::edits::edits_with_max_distance(word, distance);
        for (depth, layer) in layers.iter().enumerate() {
            println!("distance {depth}: {} strings", layer.len());
            if *print {
                for candidate in layer {
                    println!("  {candidate}");
                }
            }
        }
        return Ok(());
    }

    let Some(corpus_path) = config.corpus_path.clone() else {
        return Err("no corpus given and no default data directory available".into());
    };

    let spellcheck = match config.shuffle_seed {
        Some(seed) => {
            build_spellcheck(&corpus_path, &config, &mut StdRng::seed_from_u64(seed))?
        }
        None => build_spellcheck(&corpus_path, &config, &mut rand::thread_rng())?,
    };

    match args.command {
        Command::Check { words } => {
            for word in words {
                let query = normalize_query(&word, config.lowercase);
                let status = if spellcheck.is_correct(&query) {
                    "ok"
                } else {
                    "misspelled"
                };
                println!("{word}: {status}");
            }
        }
        Command::Correct { word, max_distance } => {
            let max_distance = match max_distance {
                Some(distance) => validate_distance(distance)?,
                None => config.max_distance()?,
            };

            let query = normalize_query(&word, config.lowercase);
            let suggestions = spellcheck.lookup(&query, max_distance)?;
            if suggestions.is_empty() {
                println!("No corrections for '{word}' within distance {max_distance}");
            }
            for suggestion in suggestions {
                println!(
                    "{}\tdistance={}\tfrequency={}",
                    suggestion.term, suggestion.distance, suggestion.frequency
                );
            }
        }
        Command::Stats => {
            println!("Distinct words: {}", spellcheck.len());
            println!("Total words: {}", spellcheck.total_words());
            println!("Tree depth: {}", spellcheck.index().depth());
        }
        Command::Edits { .. } => {}
    }

    Ok(())
}

fn build_spellcheck<R: Rng>(
    path: &Path,
    config: &Config,
    rng: &mut R,
) -> Result<Spellcheck, Box<dyn std::error::Error>> {
    let spellcheck = if config.frequency_list {
        let entries = corpus::load_frequency_list(path)?
            .into_iter()
            .map(|(word, count)| (normalize_query(&word, config.lowercase), count));
        Spellcheck::from_frequencies_with_rng(entries, DamerauLevenshtein, rng)
    } else {
        let words = corpus::load_text(path, config.lowercase)?;
        Spellcheck::with_rng(words, DamerauLevenshtein, rng)
    };

    info!(
        distinct = spellcheck.len(),
        total = spellcheck.total_words(),
        "Spellcheck ready"
    );
    debug!(depth = spellcheck.index().depth(), "Index shape");
    Ok(spellcheck)
}

/// Fold a word the way corpus words are folded, so queries and corpus agree.
fn normalize_query(word: &str, lowercase: bool) -> String {
    if lowercase {
        word.to_lowercase()
    } else {
        word.to_string()
    }
}
