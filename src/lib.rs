//! Wordwheel renders circular anagram puzzles.
//!
//! Eight letters sit between the spokes of a ringed wheel and a ninth sits in the middle. The
//! renderer is a pure function from ordered letters, an output size and a font to an RGB raster:
//!
//! - Build a [`LetterSet`] (or let [`word_to_letters`] shuffle a word into one)
//! - Render with [`render`] or a reusable [`WheelRenderer`]
//! - Save the [`RenderedImage`] as PNG, or let [`ImageCache`] store it and hand out signed URLs
//!
//! The [`server`] module exposes the cache over HTTP.
#![forbid(unsafe_code)]

mod assets;
mod foundation;
mod layout;
mod storage;

/// Wheel rasterization.
pub mod render;
/// HTTP endpoint.
pub mod server;
pub mod words;

pub use crate::assets::font::FontFace;
pub use crate::foundation::core::{LetterSet, Point, RADIAL_LETTERS, Vec2, WHEEL_LETTERS};
pub use crate::foundation::error::{WheelError, WheelResult};
pub use crate::layout::geometry::{
    DEFAULT_OUTPUT_SIZE, Ring, SUPERSAMPLING_RATIO, WheelGeometry, WheelProportions, anchor_angle,
    spoke_angle,
};
pub use crate::render::{
    DEFAULT_FONT_FILE, MAX_CANVAS_SIZE, RenderConfig, RenderedImage, WheelRenderer, render,
    render_with_font,
};
pub use crate::server::ServerConfig;
pub use crate::server::payload::{Attachment, AttachmentMessage};
pub use crate::server::routes::{AppState, MAX_HTTP_OUTPUT_SIZE, Reply};
pub use crate::storage::cache::{CachedImage, ImageCache};
pub use crate::storage::signing::{DEFAULT_URL_EXPIRY_SECS, UrlCheck, UrlSigner};
pub use crate::storage::store::{
    FsObjectStore, IMAGE_PREFIX, MemoryObjectStore, ObjectStore, object_key,
};
pub use crate::words::{WordList, word_to_letters};
