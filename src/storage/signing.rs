use hmac::{Hmac, Mac as _};
use sha2::Sha256;

use crate::foundation::error::{WheelError, WheelResult};

/// Lifetime of issued URLs unless configured otherwise.
pub const DEFAULT_URL_EXPIRY_SECS: i64 = 3600;

type HmacSha256 = Hmac<Sha256>;

/// Outcome of checking a signed URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlCheck {
    Valid,
    Expired,
    BadSignature,
}

/// Issues and verifies time-limited retrieval URLs for stored objects.
///
/// URLs look like `{base}/{key}?expires={unix}&signature={hex}`, where the signature is
/// HMAC-SHA256 over `GET\n{key}\n{expires}`.
#[derive(Clone)]
pub struct UrlSigner {
    mac: HmacSha256,
    base: url::Url,
    expiry_secs: i64,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner")
            .field("base", &self.base.as_str())
            .field("expiry_secs", &self.expiry_secs)
            .finish_non_exhaustive()
    }
}

impl UrlSigner {
    pub fn new(secret: impl AsRef<[u8]>, base_url: &str) -> WheelResult<Self> {
        let mut base = url::Url::parse(base_url).map_err(|e| {
            WheelError::Other(anyhow::anyhow!("invalid base url '{base_url}': {e}"))
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mac = HmacSha256::new_from_slice(secret.as_ref())
            .map_err(|e| WheelError::Other(anyhow::anyhow!("invalid signing key: {e}")))?;
        Ok(Self {
            mac,
            base,
            expiry_secs: DEFAULT_URL_EXPIRY_SECS,
        })
    }

    pub fn with_expiry_secs(mut self, secs: i64) -> Self {
        self.expiry_secs = secs;
        self
    }

    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }

    /// Hex signature for `key` valid until `expires` (unix seconds).
    pub fn signature(&self, key: &str, expires: i64) -> String {
        hex::encode(self.mac_for(key, expires).finalize().into_bytes())
    }

    fn mac_for(&self, key: &str, expires: i64) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(format!("GET\n{key}\n{expires}").as_bytes());
        mac
    }

    /// Signed URL for `key`, expiring `expiry_secs` after `now`.
    pub fn sign(&self, key: &str, now: i64) -> WheelResult<String> {
        let expires = now.saturating_add(self.expiry_secs);
        let mut url = self
            .base
            .join(key)
            .map_err(|e| WheelError::Other(anyhow::anyhow!("invalid object key '{key}': {e}")))?;
        url.query_pairs_mut()
            .append_pair("expires", &expires.to_string())
            .append_pair("signature", &self.signature(key, expires));
        Ok(url.into())
    }

    pub fn verify(&self, key: &str, expires: i64, signature: &str, now: i64) -> UrlCheck {
        let Ok(tag) = hex::decode(signature) else {
            return UrlCheck::BadSignature;
        };
        // Constant-time comparison.
        if self.mac_for(key, expires).verify_slice(&tag).is_err() {
            return UrlCheck::BadSignature;
        }
        if now > expires {
            return UrlCheck::Expired;
        }
        UrlCheck::Valid
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/signing.rs"]
mod tests;
