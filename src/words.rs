//! Word source: candidate words and letter ordering.
//!
//! All randomness lives here, never in the renderer.

use std::path::Path;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::foundation::core::{LetterSet, WHEEL_LETTERS};
use crate::foundation::error::{WheelError, WheelResult};

/// Uppercased candidate words, each exactly [`WHEEL_LETTERS`] alphabetic characters long.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Read a line-oriented word file.
    ///
    /// Only lines of exactly nine alphabetic characters (after trimming) become candidates;
    /// every other line is skipped and counted in a debug event. Picking from every line would
    /// let a random choice produce a word that [`word_to_letters`] then rejects.
    #[tracing::instrument(level = "debug")]
    pub fn load(path: &Path) -> WheelResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            WheelError::word_source(format!("read word list '{}': {e}", path.display()))
        })?;
        Self::from_lines(text.lines())
    }

    /// Same filtering as [`WordList::load`], over in-memory lines.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> WheelResult<Self> {
        let mut skipped = 0usize;
        let mut words = Vec::new();
        for line in lines {
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            if is_candidate(word) {
                words.push(word.to_uppercase());
            } else {
                skipped += 1;
            }
        }
        if words.is_empty() {
            return Err(WheelError::word_source(format!(
                "word list has no {WHEEL_LETTERS}-letter words"
            )));
        }
        tracing::debug!(words = words.len(), skipped, "word list loaded");
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Pick one word uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // `from_lines` guarantees at least one word.
        self.words
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

fn is_candidate(word: &str) -> bool {
    word.chars().count() == WHEEL_LETTERS && word.chars().all(char::is_alphabetic)
}

/// Turn a word into wheel letters: uppercase, then shuffle all letters unless `verbatim`.
///
/// In verbatim mode the letters run clockwise from 3 o'clock, and the last one is the centre.
pub fn word_to_letters<R: Rng + ?Sized>(
    word: &str,
    verbatim: bool,
    rng: &mut R,
) -> WheelResult<LetterSet> {
    let mut letters: Vec<char> = word.trim().chars().flat_map(char::to_uppercase).collect();
    if letters.len() != WHEEL_LETTERS {
        return Err(WheelError::invalid_letter_count(WHEEL_LETTERS, letters.len()));
    }
    if !verbatim {
        letters.shuffle(rng);
    }
    LetterSet::new(letters)
}

#[cfg(test)]
#[path = "../tests/unit/words/words.rs"]
mod tests;
