use std::path::PathBuf;

/// Result alias used across the crate.
pub type WheelResult<T> = Result<T, WheelError>;

/// Errors produced by rendering and by the collaborators around the renderer.
#[derive(thiserror::Error, Debug)]
pub enum WheelError {
    /// A letter set did not contain exactly the expected number of letters.
    #[error("invalid letter count: expected {expected}, got {got}")]
    InvalidLetterCount {
        /// Required number of letters.
        expected: usize,
        /// Number of letters actually supplied.
        got: usize,
    },

    /// Output size (or a size derived from it) is unusable.
    #[error("invalid size: {0}")]
    InvalidSize(String),

    /// The font resource could not be read or parsed.
    #[error("font load error for '{}': {reason}", path.display())]
    FontLoad {
        /// Path (or label) of the font resource.
        path: PathBuf,
        /// Human-readable cause.
        reason: String,
    },

    /// An object-store operation failed for a reason other than a missing object.
    #[error("storage error for '{key}': {source}")]
    Storage {
        /// Object key involved in the failed operation.
        key: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The requested object does not exist in the store.
    #[error("object not found: {0}")]
    NotFound(String),

    /// The word list is missing, unreadable, or has no usable words.
    #[error("word source error: {0}")]
    WordSource(String),

    /// Rasterization or image encoding failed.
    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WheelError {
    pub fn invalid_letter_count(expected: usize, got: usize) -> Self {
        Self::InvalidLetterCount { expected, got }
    }

    pub fn invalid_size(msg: impl Into<String>) -> Self {
        Self::InvalidSize(msg.into())
    }

    pub fn font_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FontLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn storage(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            key: key.into(),
            source,
        }
    }

    pub fn word_source(msg: impl Into<String>) -> Self {
        Self::WordSource(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Return `true` for errors caused by caller input rather than by the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLetterCount { .. } | Self::InvalidSize(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
