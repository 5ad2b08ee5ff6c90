use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::foundation::core::LetterSet;
use crate::foundation::error::{WheelError, WheelResult};

/// Prefix under which rendered wheels are stored.
pub const IMAGE_PREFIX: &str = "images";

/// Deterministic key for a rendered wheel: `images/{letters in order}_{size}.png`.
///
/// Letter order is part of the key because it changes the picture. Characters outside ASCII
/// alphanumerics are written as `-u{hex}` so keys stay URL- and filesystem-safe.
pub fn object_key(letters: &LetterSet, size: u32) -> String {
    let mut name = String::with_capacity(letters.as_slice().len() + 8);
    for &c in letters.as_slice() {
        if c.is_ascii_alphanumeric() {
            name.push(c);
        } else {
            name.push_str(&format!("-u{:x}", u32::from(c)));
        }
    }
    format!("{IMAGE_PREFIX}/{name}_{size}.png")
}

/// Blob store holding rendered PNGs.
///
/// "Object not found" is the only expected miss; every other failure is a
/// [`WheelError::Storage`] and must reach the caller.
pub trait ObjectStore: Send + Sync {
    /// Return `Ok(false)` only when the object is missing.
    fn exists(&self, key: &str) -> WheelResult<bool>;
    /// Fetch an object; a missing object is [`WheelError::NotFound`].
    fn get(&self, key: &str) -> WheelResult<Vec<u8>>;
    /// Store an object, replacing any previous value.
    fn put(&self, key: &str, bytes: &[u8]) -> WheelResult<()>;
}

/// Normalize and validate store-relative keys.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute keys or
/// parent traversals (`..`).
pub(crate) fn normalize_key(key: &str) -> WheelResult<String> {
    let invalid = |msg: &str| {
        WheelError::storage(key, std::io::Error::new(ErrorKind::InvalidInput, msg.to_string()))
    };
    let s = key.replace('\\', "/");
    if s.starts_with('/') {
        return Err(invalid("object keys must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(invalid("object keys must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(invalid("object key must contain a file name"));
    }
    Ok(out.join("/"))
}

/// Directory-backed store; the directory plays the role of a bucket.
#[derive(Clone, Debug)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Open (and create if needed) the bucket directory.
    pub fn open(root: impl Into<PathBuf>) -> WheelResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| WheelError::storage(root.display().to_string(), e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> WheelResult<PathBuf> {
        Ok(self.root.join(normalize_key(key)?))
    }
}

impl ObjectStore for FsObjectStore {
    fn exists(&self, key: &str) -> WheelResult<bool> {
        let path = self.path_for(key)?;
        match std::fs::metadata(&path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(WheelError::storage(key, e)),
        }
    }

    fn get(&self, key: &str) -> WheelResult<Vec<u8>> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(WheelError::NotFound(key.to_string())),
            Err(e) => Err(WheelError::storage(key, e)),
        }
    }

    fn put(&self, key: &str, bytes: &[u8]) -> WheelResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WheelError::storage(key, e))?;
        }
        // Readers never observe a partially written object.
        let tmp = path.with_extension(format!("{:016x}.tmp", rand::random::<u64>()));
        std::fs::write(&tmp, bytes).map_err(|e| WheelError::storage(key, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            WheelError::storage(key, e)
        })?;
        tracing::debug!(key, bytes = bytes.len(), "object stored");
        Ok(())
    }
}

/// In-memory store for tests and debugging.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A poisoned map is still a valid map.
        self.objects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ObjectStore for MemoryObjectStore {
    fn exists(&self, key: &str) -> WheelResult<bool> {
        let key = normalize_key(key)?;
        Ok(self.lock().contains_key(&key))
    }

    fn get(&self, key: &str) -> WheelResult<Vec<u8>> {
        let norm = normalize_key(key)?;
        self.lock()
            .get(&norm)
            .cloned()
            .ok_or_else(|| WheelError::NotFound(key.to_string()))
    }

    fn put(&self, key: &str, bytes: &[u8]) -> WheelResult<()> {
        let key = normalize_key(key)?;
        self.lock().insert(key, bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/store.rs"]
mod tests;
