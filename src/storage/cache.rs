use std::sync::Arc;

use crate::foundation::core::LetterSet;
use crate::foundation::error::WheelResult;
use crate::render::WheelRenderer;
use crate::storage::signing::UrlSigner;
use crate::storage::store::{ObjectStore, object_key};

/// Outcome of a cache lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedImage {
    pub key: String,
    pub url: String,
    /// `true` when this call rendered and stored the image.
    pub generated: bool,
}

/// Cache-or-generate front for rendered wheels.
#[derive(Clone)]
pub struct ImageCache {
    store: Arc<dyn ObjectStore>,
    renderer: WheelRenderer,
    signer: UrlSigner,
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("renderer", &self.renderer)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

impl ImageCache {
    pub fn new(store: Arc<dyn ObjectStore>, renderer: WheelRenderer, signer: UrlSigner) -> Self {
        Self {
            store,
            renderer,
            signer,
        }
    }

    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    pub fn signer(&self) -> &UrlSigner {
        &self.signer
    }

    /// Return a signed URL for the wheel, rendering and storing it first on a miss.
    ///
    /// Storage failures other than a missing object propagate unchanged.
    #[tracing::instrument(skip(self, letters), fields(letters = %letters))]
    pub fn fetch_or_render(
        &self,
        letters: &LetterSet,
        size: u32,
        now: i64,
    ) -> WheelResult<CachedImage> {
        let key = object_key(letters, size);
        let generated = if self.store.exists(&key)? {
            tracing::debug!(%key, "cache hit");
            false
        } else {
            tracing::info!(%key, "cache miss, rendering");
            let image = self.renderer.render(letters, size)?;
            let png = image.encode_png()?;
            self.store.put(&key, &png)?;
            true
        };

        let url = self.signer.sign(&key, now)?;
        Ok(CachedImage {
            key,
            url,
            generated,
        })
    }
}
