//! Versioned cache bucket storage.
//!
//! A bucket is a named store of URL → response-body mappings. Exactly one
//! bucket name is "current" at any time; activation deletes the rest. Puts
//! are idempotent and last-writer-wins, which is acceptable because entries
//! are immutable static assets identified by URL.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::error::{Error, Result};

/// Abstraction over cache bucket storage.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the names of all existing buckets.
    async fn bucket_names(&self) -> Result<Vec<String>>;

    /// Deletes a bucket and all of its entries. Deleting a bucket that does
    /// not exist is a no-op.
    async fn delete_bucket(&self, name: &str) -> Result<()>;

    /// Returns the cached body for `url` in `bucket`, if present.
    async fn get(&self, bucket: &str, url: &str) -> Result<Option<Bytes>>;

    /// Stores `body` under `url` in `bucket`, creating the bucket if absent.
    async fn put(&self, bucket: &str, url: &str, body: Bytes) -> Result<()>;

    /// Returns `true` if `bucket` holds an entry for `url`.
    async fn contains(&self, bucket: &str, url: &str) -> Result<bool> {
        Ok(self.get(bucket, url).await?.is_some())
    }
}

/// In-memory cache store, the browser `CacheStorage` analog.
///
/// This is the default store for page-lifetime use and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    buckets: Mutex<HashMap<String, HashMap<String, Bytes>>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries in `bucket`, or zero if it is absent.
    pub async fn entry_count(&self, bucket: &str) -> usize {
        self.buckets
            .lock()
            .await
            .get(bucket)
            .map_or(0, HashMap::len)
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn bucket_names(&self) -> Result<Vec<String>> {
        Ok(self.buckets.lock().await.keys().cloned().collect())
    }

    async fn delete_bucket(&self, name: &str) -> Result<()> {
        self.buckets.lock().await.remove(name);
        Ok(())
    }

    async fn get(&self, bucket: &str, url: &str) -> Result<Option<Bytes>> {
        Ok(self
            .buckets
            .lock()
            .await
            .get(bucket)
            .and_then(|b| b.get(url).cloned()))
    }

    async fn put(&self, bucket: &str, url: &str, body: Bytes) -> Result<()> {
        self.buckets
            .lock()
            .await
            .entry(bucket.to_string())
            .or_default()
            .insert(url.to_string(), body);
        Ok(())
    }
}

/// Metadata sidecar stored next to each on-disk entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryMeta {
    url: String,
    size: u64,
    stored_at: DateTime<Utc>,
}

/// Disk-backed cache store used by the deploy-time cache warmer.
///
/// Layout: one directory per bucket under `root`; each entry's body lives
/// under the SHA-256 of its URL with a TOML sidecar recording the original
/// URL, size, and storage time. Writes are tmp-file + rename atomic.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Creates a store rooted at `root`. The directory is created lazily on
    /// first put.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the store's root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Bucket names become directory names, so path separators are rejected.
    fn bucket_dir(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::Store(format!("invalid bucket name: {name:?}")));
        }
        Ok(self.root.join(name))
    }

    fn entry_stem(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let hash = hasher.finalize();
        format!("{hash:x}")
    }
}

/// Writes `contents` to `path` atomically (write tmp + rename).
async fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await
}

#[async_trait]
impl CacheStore for DiskStore {
    async fn bucket_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    async fn delete_bucket(&self, name: &str) -> Result<()> {
        let dir = self.bucket_dir(name)?;
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, bucket: &str, url: &str) -> Result<Option<Bytes>> {
        let path = self
            .bucket_dir(bucket)?
            .join(format!("{}.bin", Self::entry_stem(url)));
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(Some(Bytes::from(body))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, bucket: &str, url: &str, body: Bytes) -> Result<()> {
        let dir = self.bucket_dir(bucket)?;
        tokio::fs::create_dir_all(&dir).await?;

        let stem = Self::entry_stem(url);
        write_atomic(&dir.join(format!("{stem}.bin")), &body).await?;

        let meta = EntryMeta {
            url: url.to_string(),
            size: body.len() as u64,
            stored_at: Utc::now(),
        };
        let meta_str = toml::to_string(&meta).map_err(|e| Error::Store(e.to_string()))?;
        write_atomic(&dir.join(format!("{stem}.toml")), meta_str.as_bytes()).await?;
        Ok(())
    }

    async fn contains(&self, bucket: &str, url: &str) -> Result<bool> {
        let path = self
            .bucket_dir(bucket)?
            .join(format!("{}.bin", Self::entry_stem(url)));
        Ok(tokio::fs::try_exists(&path).await?)
    }
}
