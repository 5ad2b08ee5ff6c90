use crate::foundation::error::{WheelError, WheelResult};

pub use kurbo::{Point, Vec2};

/// Number of letters placed around the wheel.
pub const RADIAL_LETTERS: usize = 8;

/// Total letters in a puzzle: the radial ring plus the centre.
pub const WHEEL_LETTERS: usize = RADIAL_LETTERS + 1;

/// Ordered puzzle letters: eight radial letters clockwise from 3 o'clock, then the centre letter.
///
/// Ordering is decided by the caller; the renderer never reorders or shuffles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LetterSet {
    letters: [char; WHEEL_LETTERS],
}

impl LetterSet {
    /// Build a letter set from exactly [`WHEEL_LETTERS`] characters.
    ///
    /// Case is kept as given.
    pub fn new(letters: impl IntoIterator<Item = char>) -> WheelResult<Self> {
        let letters: Vec<char> = letters.into_iter().collect();
        let got = letters.len();
        let letters: [char; WHEEL_LETTERS] = letters
            .try_into()
            .map_err(|_| WheelError::invalid_letter_count(WHEEL_LETTERS, got))?;
        Ok(Self { letters })
    }

    /// Uppercase `word` and use its characters in order.
    pub fn from_word(word: &str) -> WheelResult<Self> {
        Self::new(word.trim().chars().flat_map(char::to_uppercase))
    }

    /// The eight letters drawn between the spokes.
    pub fn radial(&self) -> &[char] {
        &self.letters[..RADIAL_LETTERS]
    }

    /// The letter drawn in the middle of the wheel.
    pub fn center(&self) -> char {
        self.letters[RADIAL_LETTERS]
    }

    pub fn as_slice(&self) -> &[char] {
        &self.letters
    }

    /// All letters concatenated in order.
    pub fn joined(&self) -> String {
        self.letters.iter().collect()
    }
}

impl std::fmt::Display for LetterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.joined())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
