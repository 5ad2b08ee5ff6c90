use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

pub const FALLBACK_TEXT: &str = "Wordwheel anagram puzzle image";
pub const FOOTER_TEXT: &str = "Wordwheel";

/// Chat-message body returned by the generate endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMessage {
    pub attachments: Vec<Attachment>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub fallback: String,
    /// Calendar date of the puzzle, `YYYY-MM-DD`.
    pub title: String,
    pub image_url: String,
    pub footer: String,
    /// Unix timestamp in seconds.
    pub ts: i64,
}

impl AttachmentMessage {
    /// Single-attachment message for `image_url`, stamped with `now`.
    pub fn for_image<Tz: TimeZone>(image_url: impl Into<String>, now: &DateTime<Tz>) -> Self {
        Self {
            attachments: vec![Attachment {
                fallback: FALLBACK_TEXT.to_string(),
                title: now.date_naive().format("%Y-%m-%d").to_string(),
                image_url: image_url.into(),
                footer: FOOTER_TEXT.to_string(),
                ts: now.timestamp(),
            }],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/server/payload.rs"]
mod tests;
