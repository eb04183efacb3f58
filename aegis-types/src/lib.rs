//! Core type definitions for Aegis Sync.
//!
//! This crate defines the fundamental value types shared by the sync engine
//! and the CLI:
//! - Node identity (base URL + shared secret)
//!
//! Wire-level request/response types belong to the sync crate, not here.

mod node;

pub use node::Node;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when decoding node identities.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The node string is not of the form `<url>|<secret>`.
    #[error("invalid node format, expected <url>|<secret>")]
    InvalidFormat,

    /// The URL portion of the node string does not parse.
    #[error("invalid node url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The URL parses but cannot carry an `api/...` path (e.g. `data:`).
    #[error("unsupported node url: {0}")]
    UnsupportedUrl(String),
}
