use std::{convert::Infallible, fs, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    core::{letters, WORD_LEN},
    validity::Validity,
};

const BUNDLED_WORDS: &str = include_str!("../words/urdu_5_letter_words.json");

/// The document shape the vocabulary fetcher writes:
/// `{ "words": [...], "count": …, "wordLength": …, "script": … }`.
#[derive(Debug, Deserialize)]
struct WordsDocument {
    words: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct WordsList {
    words: Vec<String>,
}

#[derive(Debug, Error)]
pub enum WordsError {
    #[error("reading words file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing words file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("words file contains no {WORD_LEN}-letter words")]
    Empty,
}

impl WordsList {
    /// Loads the words file at `path`, or the bundled copy when no path is
    /// configured.
    pub fn load(path: Option<&Path>) -> Result<Self, WordsError> {
        let raw = match path {
            Some(path) => fs::read_to_string(path)?,
            None => BUNDLED_WORDS.to_owned(),
        };

        Self::from_json(&raw)
    }

    fn from_json(raw: &str) -> Result<Self, WordsError> {
        let document: WordsDocument = serde_json::from_str(raw)?;
        let total = document.words.len();

        let words: Vec<String> = document
            .words
            .into_iter()
            .filter(|word| letters(word).count() == WORD_LEN)
            .collect();

        if words.len() < total {
            warn!(
                skipped = total - words.len(),
                "ignored words of the wrong length"
            );
        }

        if words.is_empty() {
            return Err(WordsError::Empty);
        }

        debug!(count = words.len(), "loaded words list");

        Ok(Self { words })
    }

    pub fn contains(&self, guess: &str) -> bool {
        self.words.iter().any(|word| word == guess)
    }

    pub(crate) fn words(&self) -> &[String] {
        &self.words
    }
}

impl Validity for WordsList {
    type Error = Infallible;

    async fn check(&self, guess: &str) -> Result<bool, Self::Error> {
        Ok(self.contains(guess))
    }
}
