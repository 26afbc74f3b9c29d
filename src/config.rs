//! Configuration types for the cache worker, carousel, and forms client.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for the offline-cache worker.
///
/// The `version` tag doubles as the cache bucket name. Bumping it on every
/// asset-list change is the sole upgrade mechanism: activation deletes every
/// bucket whose name differs from the current tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Origin the worker serves, e.g. `https://example.com`.
    pub origin: String,
    /// Version tag, used verbatim as the bucket name (e.g. `zen-v5`).
    pub version: String,
    /// Relative URLs pre-cached at install time.
    pub manifest: Vec<String>,
    /// Document served for navigations when the network is unreachable.
    /// Must also appear in the manifest.
    pub offline_shell: String,
    /// Whether a successful install takes control without waiting for old
    /// clients to go away.
    pub skip_waiting: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            origin: String::new(),
            version: "v1".to_string(),
            manifest: Vec::new(),
            offline_shell: "index.html".to_string(),
            skip_waiting: true,
        }
    }
}

impl WorkerConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the serving origin.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Sets the version tag / bucket name.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the install-time asset manifest.
    #[must_use]
    pub fn with_manifest<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manifest = urls.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the offline fallback document.
    #[must_use]
    pub fn with_offline_shell(mut self, shell: impl Into<String>) -> Self {
        self.offline_shell = shell.into();
        self
    }

    /// Sets whether install skips the waiting phase.
    #[must_use]
    pub const fn with_skip_waiting(mut self, skip: bool) -> Self {
        self.skip_waiting = skip;
        self
    }
}

/// Configuration for the carousel controller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Auto-advance interval in milliseconds.
    pub interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { interval_ms: 4500 }
    }
}

impl CarouselConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the auto-advance interval in milliseconds.
    #[must_use]
    pub const fn with_interval_ms(mut self, ms: u64) -> Self {
        self.interval_ms = ms;
        self
    }

    /// Returns the auto-advance interval as a [`Duration`].
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Configuration for the forms backend client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormsConfig {
    /// Absolute `https` endpoint of the hosted form processor.
    pub endpoint: String,
}

/// Path configuration for the persistent cache store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    /// Directory where cache buckets are stored on disk.
    pub cache_dir: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        let cache_dir = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            cache_dir: cache_dir.join("zenpage"),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Cache worker configuration.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Carousel configuration.
    #[serde(default)]
    pub carousel: CarouselConfig,
    /// Forms client configuration.
    #[serde(default)]
    pub forms: FormsConfig,
    /// Path configuration.
    #[serde(default)]
    pub paths: PathConfig,
}

impl AppConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))
    }
}
