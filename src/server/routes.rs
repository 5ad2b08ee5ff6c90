use std::collections::HashMap;

use chrono::{DateTime, TimeZone};
use rand::Rng;

use crate::foundation::error::WheelError;
use crate::layout::geometry::DEFAULT_OUTPUT_SIZE;
use crate::server::payload::AttachmentMessage;
use crate::storage::cache::ImageCache;
use crate::storage::signing::UrlCheck;
use crate::words::{WordList, word_to_letters};

const INDEX_HTML: &str = "<html><body><h1>Wordwheel</h1></body></html>";

/// Largest `size` a request may ask for; rendering allocates `(size * 8)^2` RGBA pixels.
pub const MAX_HTTP_OUTPUT_SIZE: u32 = 1000;

/// Everything a request handler needs; shared read-only by all workers.
#[derive(Debug)]
pub struct AppState {
    pub cache: ImageCache,
    pub words: WordList,
    pub default_size: u32,
}

impl AppState {
    pub fn new(cache: ImageCache, words: WordList) -> Self {
        Self {
            cache,
            words,
            default_size: DEFAULT_OUTPUT_SIZE,
        }
    }
}

/// Transport-independent HTTP reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body: body.as_bytes().to_vec(),
        }
    }

    fn json<T: serde::Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                content_type: "application/json",
                body,
            },
            Err(e) => Self::error(500, &format!("serialize response: {e}")),
        }
    }

    fn png(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: "image/png",
            body,
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: serde_json::json!({ "error": message }).to_string().into_bytes(),
        }
    }

    /// Body as UTF-8 text (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn wheel_error_reply(err: &WheelError) -> Reply {
    if err.is_client_error() {
        tracing::debug!(error = %err, "rejected request");
        Reply::error(400, &err.to_string())
    } else {
        tracing::error!(error = %err, "request failed");
        Reply::error(500, &err.to_string())
    }
}

/// Route one request. `raw_url` is the request target (path plus optional query).
#[tracing::instrument(level = "debug", skip(state, now, rng))]
pub fn handle<R, Tz>(
    state: &AppState,
    method: &str,
    raw_url: &str,
    now: &DateTime<Tz>,
    rng: &mut R,
) -> Reply
where
    R: Rng + ?Sized,
    Tz: TimeZone,
{
    let (path, query) = raw_url.split_once('?').unwrap_or((raw_url, ""));
    if !method.eq_ignore_ascii_case("GET") {
        return Reply::error(405, "method not allowed");
    }
    let params = parse_query(query);

    match path {
        "/" => Reply::html(INDEX_HTML),
        "/generate" | "/generate/" => generate(state, &params, now, rng),
        p if p.starts_with("/images/") => serve_image(state, p, &params, now.timestamp()),
        _ => Reply::error(404, "not found"),
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for (k, v) in url::form_urlencoded::parse(query.as_bytes()) {
        out.entry(k.into_owned()).or_insert_with(|| v.into_owned());
    }
    out
}

fn generate<R, Tz>(
    state: &AppState,
    params: &HashMap<String, String>,
    now: &DateTime<Tz>,
    rng: &mut R,
) -> Reply
where
    R: Rng + ?Sized,
    Tz: TimeZone,
{
    let verbatim = params.get("verbatim").is_some_and(|v| !v.is_empty());
    let word = match params.get("word").map(|w| w.trim()).filter(|w| !w.is_empty()) {
        Some(w) => w.to_string(),
        None => state.words.choose(rng).to_string(),
    };
    let size = match params.get("size") {
        None => state.default_size,
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(size) if size <= MAX_HTTP_OUTPUT_SIZE => size,
            Ok(size) => {
                return Reply::error(
                    400,
                    &format!("invalid size: {size} exceeds {MAX_HTTP_OUTPUT_SIZE}"),
                );
            }
            Err(_) => return Reply::error(400, &format!("invalid size: '{raw}'")),
        },
    };

    let letters = match word_to_letters(&word, verbatim, rng) {
        Ok(letters) => letters,
        Err(e) => return wheel_error_reply(&e),
    };
    match state.cache.fetch_or_render(&letters, size, now.timestamp()) {
        Ok(cached) => Reply::json(200, &AttachmentMessage::for_image(cached.url, now)),
        Err(e) => wheel_error_reply(&e),
    }
}

fn serve_image(
    state: &AppState,
    path: &str,
    params: &HashMap<String, String>,
    now: i64,
) -> Reply {
    let key = path.trim_start_matches('/');
    let Some(expires) = params.get("expires").and_then(|e| e.parse::<i64>().ok()) else {
        return Reply::error(403, "missing or invalid expiry");
    };
    let signature = params.get("signature").map(String::as_str).unwrap_or_default();

    match state.cache.signer().verify(key, expires, signature, now) {
        UrlCheck::Valid => {}
        UrlCheck::Expired => return Reply::error(403, "url expired"),
        UrlCheck::BadSignature => return Reply::error(403, "bad signature"),
    }

    match state.cache.store().get(key) {
        Ok(bytes) => Reply::png(bytes),
        Err(WheelError::NotFound(_)) => Reply::error(404, "not found"),
        Err(e) => wheel_error_reply(&e),
    }
}
