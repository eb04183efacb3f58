//! Error types for the sync layer.

use thiserror::Error;

/// Result type for node client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type for sync orchestration.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors raised by a single node client call.
///
/// Network-facing variants carry the request URL so a failure is
/// diagnosable without retrying; session violations are raised locally,
/// before any request is built.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The local session is unusable; no request was sent, so the error
    /// carries the node's identity instead of a request URL.
    #[error("session error on {node}: {source}")]
    Session {
        node: String,
        #[source]
        source: SessionError,
    },

    /// The node answered with a status outside 200-299.
    #[error("unexpected status code {status} from {url}")]
    Status { url: String, status: u16 },

    /// The request could not be sent or the response body not read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not decode as the expected shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A request body failed to serialize.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    pub(crate) fn transport(url: &url::Url, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn decode(url: &url::Url, source: reqwest::Error) -> Self {
        Self::Decode {
            url: url.to_string(),
            source,
        }
    }
}

/// A local session invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The node marked the session invalid.
    #[error("invalid session found")]
    Invalid,

    /// No session id is present.
    #[error("no session id found")]
    Missing,

    /// The session's remaining validity is not positive.
    #[error("expired session found")]
    Expired,
}

/// A sync failure, labeled with the phase that raised it.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("authentication failed: {0}")]
    Authentication(#[source] ClientError),

    #[error("teleporter sync failed: {0}")]
    Teleporter(#[source] ClientError),

    #[error("config sync failed: {0}")]
    Config(#[source] ClientError),

    #[error("session teardown failed: {0}")]
    Teardown(#[source] ClientError),
}
