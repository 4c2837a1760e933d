use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

/// Document-id -> category label.
pub type LabelTable = BTreeMap<String, String>;
/// Document-id -> (word -> occurrence count).
pub type WordCountTable = BTreeMap<String, BTreeMap<String, u64>>;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read the corpus file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse the corpus file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load the label table from a JSON object file:
/// `{"doc-id": "category", ...}`.
///
/// A missing or malformed file is recoverable: the loader logs a
/// warning and returns an empty table, and the pipeline downstream
/// tolerates the under-trained model that results.
pub fn load_labels<P: AsRef<Path>>(path: P) -> LabelTable {
    match try_load_labels(&path) {
        Ok(labels) => {
            info!(
                "Loaded {} document labels from {}",
                labels.len(),
                path.as_ref().display()
            );
            labels
        }
        Err(e) => {
            warn!(
                "Could not load labels from {}: {e}; continuing with an empty label table",
                path.as_ref().display()
            );
            LabelTable::new()
        }
    }
}

/// Load the word-count table from a JSON object file:
/// `{"doc-id": {"word": 3, ...}, ...}`. Counts must be non-negative
/// integers; anything else fails the parse.
///
/// Same tolerance as [`load_labels`]: failure yields an empty table.
pub fn load_word_counts<P: AsRef<Path>>(path: P) -> WordCountTable {
    match try_load_word_counts(&path) {
        Ok(counts) => {
            info!(
                "Loaded word counts for {} documents from {}",
                counts.len(),
                path.as_ref().display()
            );
            counts
        }
        Err(e) => {
            warn!(
                "Could not load word counts from {}: {e}; continuing with an empty corpus",
                path.as_ref().display()
            );
            WordCountTable::new()
        }
    }
}

/// Fallible variant for callers that need to distinguish Io from Parse.
pub fn try_load_labels<P: AsRef<Path>>(path: P) -> Result<LabelTable, CorpusError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Fallible variant for callers that need to distinguish Io from Parse.
pub fn try_load_word_counts<P: AsRef<Path>>(path: P) -> Result<WordCountTable, CorpusError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Expand a word->count map into the flat observation sequence consumed
/// by both `observe` and `classify`: each word repeated `count` times.
pub fn expand_features(word_counts: &BTreeMap<String, u64>) -> Vec<String> {
    let mut features = Vec::new();
    for (word, &count) in word_counts {
        for _ in 0..count {
            features.push(word.clone());
        }
    }
    features
}
