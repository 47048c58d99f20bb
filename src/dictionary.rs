//! Word dictionary: validity checks and random secret selection.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use anyhow::bail;
use rand::prelude::IndexedRandom;

use crate::session::WORD_LENGTH;

/// Source of secret words and guess validation.
pub trait Dictionary: Send + Sync + 'static {
    /// Whether `word` is an accepted guess (case-insensitive).
    fn is_valid(&self, word: &str) -> bool;

    /// Draw a random secret word, uppercase.
    fn random_word(&self) -> String;
}

/// In-memory word list loaded from a newline-delimited file.
pub struct WordList {
    words: Vec<String>,
    index: HashSet<String>,
}

impl WordList {
    /// Load words from `path`, one per line. Blank lines and words that are
    /// not exactly [`WORD_LENGTH`] letters long are skipped.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dictionary file {}", path.display()))?;
        Self::from_words(contents.lines())
            .with_context(|| format!("dictionary file {} is unusable", path.display()))
    }

    /// Build a word list from an iterator of words, normalizing to uppercase.
    pub fn from_words<I, S>(words: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Vec::new();
        let mut index = HashSet::new();
        for word in words {
            let word = word.as_ref().trim().to_uppercase();
            if word.chars().count() != WORD_LENGTH {
                continue;
            }
            if index.insert(word.clone()) {
                list.push(word);
            }
        }
        if list.is_empty() {
            bail!("no {WORD_LENGTH}-letter words found");
        }
        Ok(Self { words: list, index })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn is_valid(&self, word: &str) -> bool {
        self.index.contains(&word.to_uppercase())
    }

    fn random_word(&self) -> String {
        // Constructors reject empty lists, so `choose` always succeeds.
        self.words
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_default()
    }
}
