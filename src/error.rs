//! Error types for the zenpage library.

use thiserror::Error;

/// Errors that can occur during cache and page operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error during cache storage operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A URL could not be parsed or resolved.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Install was aborted before the new bucket was promoted.
    #[error("install aborted: {0}")]
    Install(String),

    /// Cache store operation failed.
    #[error("cache store error: {0}")]
    Store(String),

    /// Configuration is invalid or could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for zenpage operations.
pub type Result<T> = std::result::Result<T, Error>;
