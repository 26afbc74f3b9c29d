//! zenpage - offline caching and progressive enhancement for a static site.
//!
//! This library provides the core behavior of the landing page's
//! service-worker cache (versioned buckets, install/activate lifecycle,
//! network-first/cache-first fetch routing) and its page-context state
//! machines (carousel, theme toggle, modal, scroll reveal), abstracted from
//! any specific host through small capability traits.
//!
//! # Example
//!
//! ```no_run
//! use zenpage::{CacheWorker, HttpNetwork, MemoryStore, WorkerConfig};
//!
//! # async fn example() -> zenpage::Result<()> {
//! let config = WorkerConfig::new()
//!     .with_origin("https://example.com")
//!     .with_version("zen-v5")
//!     .with_manifest(["index.html", "styles.css", "script.js"])
//!     .with_offline_shell("index.html");
//!
//! let mut worker = CacheWorker::new(MemoryStore::new(), HttpNetwork::new(), config)?;
//!
//! // Pre-cache the manifest, then purge buckets from older versions.
//! let cached = worker.install().await?;
//! let purged = worker.activate().await?;
//! println!("cached {cached} assets, purged {purged} stale buckets");
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod carousel;
pub mod config;
pub mod error;
pub mod forms;
pub mod manifest;
pub mod network;
pub mod page;
pub mod store;
pub mod worker;

// Re-export main types for convenience
pub use carousel::{CarouselController, Direction, Surface};
pub use config::{AppConfig, CarouselConfig, FormsConfig, PathConfig, WorkerConfig};
pub use error::{Error, Result};
pub use forms::{FormSubmission, FormsClient};
pub use manifest::AssetManifest;
pub use network::{HttpNetwork, NetworkFetch};
pub use page::{HeaderLayout, ModalState, RevealTracker, Theme, ThemePersist, ThemeToggle};
pub use store::{CacheStore, DiskStore, MemoryStore};
pub use worker::{CacheWorker, FetchOutcome, FetchRequest, RequestMode, ServedSource, WorkerState};
