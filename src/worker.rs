//! Offline-cache worker: install/activate lifecycle and fetch routing.
//!
//! One worker instance exists per registration lifecycle. Install pre-caches
//! the asset manifest into the version bucket all-or-nothing; activate
//! purges every bucket whose name is not the current version tag; fetch
//! routing serves navigations network-first (offline shell as fallback) and
//! static assets cache-first with write-through.

use bytes::Bytes;
use url::Url;

use crate::config::WorkerConfig;
use crate::error::{Error, Result};
use crate::manifest::AssetManifest;
use crate::network::NetworkFetch;
use crate::store::CacheStore;

/// Worker lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Install event in progress; the version bucket is being populated.
    Installing,
    /// Install succeeded; the new version is ready to take over.
    Installed,
    /// Activate event in progress; stale buckets are being purged.
    Activating,
    /// Worker controls the page and intercepts fetches.
    Active,
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Installing => write!(f, "installing"),
            Self::Installed => write!(f, "installed"),
            Self::Activating => write!(f, "activating"),
            Self::Active => write!(f, "active"),
        }
    }
}

/// How an intercepted request should be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Top-level document load.
    Navigate,
    /// Static sub-resource (script, style, image, manifest).
    Asset,
}

/// An intercepted request.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Absolute request URL.
    pub url: Url,
    /// Request classification.
    pub mode: RequestMode,
}

impl FetchRequest {
    /// Creates a navigation request.
    #[must_use]
    pub const fn navigate(url: Url) -> Self {
        Self {
            url,
            mode: RequestMode::Navigate,
        }
    }

    /// Creates a static-asset request.
    #[must_use]
    pub const fn asset(url: Url) -> Self {
        Self {
            url,
            mode: RequestMode::Asset,
        }
    }
}

/// Where a served response body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServedSource {
    /// Current version bucket.
    Cache,
    /// Live network fetch.
    Network,
    /// Cached offline-shell document, served because the network failed.
    OfflineShell,
}

/// Outcome of routing one intercepted request.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Cross-origin request; the platform handles it natively, untouched.
    Bypass,
    /// Same-origin request served with a body.
    Served {
        /// Response body.
        body: Bytes,
        /// Which layer produced the body.
        source: ServedSource,
    },
}

impl FetchOutcome {
    /// Returns `true` if the request was left to the platform.
    #[must_use]
    pub const fn is_bypass(&self) -> bool {
        matches!(self, Self::Bypass)
    }

    /// Returns the serving source, if the request was served.
    #[must_use]
    pub const fn source(&self) -> Option<ServedSource> {
        match self {
            Self::Bypass => None,
            Self::Served { source, .. } => Some(*source),
        }
    }
}

/// The offline-cache worker.
///
/// Generic over its cache store and network layer so routing decisions can
/// be tested without a browser or a live server.
pub struct CacheWorker<S: CacheStore, N: NetworkFetch> {
    store: S,
    network: N,
    origin: Url,
    version: String,
    manifest: AssetManifest,
    shell_url: Url,
    skip_waiting: bool,
    state: WorkerState,
}

impl<S: CacheStore, N: NetworkFetch> CacheWorker<S, N> {
    /// Creates a worker from its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the origin is not an absolute URL, the manifest
    /// is empty, or the manifest does not list the offline-shell document
    /// (an install that cannot satisfy its own fallback contract must not
    /// start).
    pub fn new(store: S, network: N, config: WorkerConfig) -> Result<Self> {
        let origin = Url::parse(&config.origin)
            .map_err(|e| Error::Config(format!("origin {:?}: {e}", config.origin)))?;
        if config.manifest.is_empty() {
            return Err(Error::Config("manifest lists no assets".to_string()));
        }
        let manifest = AssetManifest::new(config.manifest);
        if !manifest.contains(&config.offline_shell) {
            return Err(Error::Config(format!(
                "offline shell {:?} is not in the manifest",
                config.offline_shell
            )));
        }
        let shell_url = origin.join(&config.offline_shell)?;

        Ok(Self {
            store,
            network,
            origin,
            version: config.version,
            manifest,
            shell_url,
            skip_waiting: config.skip_waiting,
            state: WorkerState::Installing,
        })
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> WorkerState {
        self.state
    }

    /// Returns the current version tag (the bucket name).
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns a reference to the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Pre-caches every manifest asset into the version bucket.
    ///
    /// All manifest fetches run concurrently and are treated as a single
    /// atomic group: nothing is written until every fetch has succeeded, so
    /// a failed install leaves the previously active bucket untouched and
    /// promotes no partial bucket. Returns the number of assets cached.
    ///
    /// # Errors
    ///
    /// Returns an error if any manifest URL cannot be fetched or stored.
    pub async fn install(&mut self) -> Result<usize> {
        self.state = WorkerState::Installing;
        let urls = self.manifest.resolve(&self.origin)?;

        let network = &self.network;
        let fetches = urls.iter().map(|url| async move {
            let body = network
                .fetch(url)
                .await
                .map_err(|e| Error::Install(format!("{url}: {e}")))?;
            Ok::<_, Error>((url, body))
        });
        let entries = futures::future::try_join_all(fetches).await?;

        for (url, body) in entries {
            if let Err(e) = self.store.put(&self.version, url.as_str(), body).await {
                // A half-written bucket must not survive a failed install.
                let _ = self.store.delete_bucket(&self.version).await;
                return Err(e);
            }
        }

        self.state = WorkerState::Installed;
        if self.skip_waiting {
            log::info!(
                "version {} installed ({} assets), skipping waiting phase",
                self.version,
                urls.len()
            );
        } else {
            log::info!("version {} installed ({} assets)", self.version, urls.len());
        }
        Ok(urls.len())
    }

    /// Deletes every bucket whose name is not the current version tag, then
    /// takes control of open clients. Returns the number of purged buckets.
    ///
    /// This is the sole eviction mechanism: whole-bucket generational
    /// collection keyed by version string, no per-entry expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if bucket enumeration or deletion fails.
    pub async fn activate(&mut self) -> Result<usize> {
        self.state = WorkerState::Activating;

        let mut purged = 0;
        for name in self.store.bucket_names().await? {
            if name != self.version {
                self.store.delete_bucket(&name).await?;
                log::debug!("purged stale bucket {name}");
                purged += 1;
            }
        }

        self.state = WorkerState::Active;
        log::info!("version {} active, claiming clients", self.version);
        Ok(purged)
    }

    /// Routes one intercepted request.
    ///
    /// Cross-origin requests bypass the worker entirely — neither the store
    /// nor the network layer is touched, which keeps third-party endpoints
    /// (notably the forms backend) out of the cache. Navigations go
    /// network-first with the cached offline shell as fallback; assets go
    /// cache-first with write-through on miss.
    ///
    /// # Errors
    ///
    /// Returns the network error for a navigation with no cached shell, or
    /// for an asset miss the network cannot satisfy.
    pub async fn handle_fetch(&self, request: &FetchRequest) -> Result<FetchOutcome> {
        if request.url.origin() != self.origin.origin() {
            return Ok(FetchOutcome::Bypass);
        }

        match request.mode {
            RequestMode::Navigate => match self.network.fetch(&request.url).await {
                Ok(body) => Ok(FetchOutcome::Served {
                    body,
                    source: ServedSource::Network,
                }),
                Err(err) => {
                    match self.store.get(&self.version, self.shell_url.as_str()).await? {
                        Some(body) => {
                            log::debug!("serving offline shell for {}", request.url);
                            Ok(FetchOutcome::Served {
                                body,
                                source: ServedSource::OfflineShell,
                            })
                        }
                        None => Err(err),
                    }
                }
            },
            RequestMode::Asset => {
                if let Some(body) = self.store.get(&self.version, request.url.as_str()).await? {
                    return Ok(FetchOutcome::Served {
                        body,
                        source: ServedSource::Cache,
                    });
                }
                let body = self.network.fetch(&request.url).await?;
                // A failed write-through costs a future hit, not this
                // response.
                if let Err(e) = self
                    .store
                    .put(&self.version, request.url.as_str(), body.clone())
                    .await
                {
                    log::warn!("write-through failed for {}: {e}", request.url);
                }
                Ok(FetchOutcome::Served {
                    body,
                    source: ServedSource::Network,
                })
            }
        }
    }
}
