//! Appliance API client.
//!
//! [`NodeApi`] is the capability interface the orchestrator drives; the one
//! production implementation is [`HttpNodeClient`]. Keeping the seam a trait
//! lets the orchestrator run against in-memory doubles in tests.

mod http;
pub mod mock;
pub mod model;
mod session;

pub use http::HttpNodeClient;
pub use session::Session;

pub use crate::error::SessionError;
use crate::error::ClientResult;
use async_trait::async_trait;
use model::{ConfigResponse, PatchConfigRequest, TeleporterImport, VersionResponse};

/// Protocol operations against exactly one appliance.
///
/// Every operation except `authenticate` requires a prior successful
/// `authenticate` on the same client; calls on an unusable session fail
/// locally without touching the network.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// A diagnostic name for the node (its base URL).
    fn identity(&self) -> String;

    /// Opens a session by posting the shared secret to the login endpoint.
    ///
    /// A structurally successful response whose session fails the validity
    /// invariant is still reported as an authentication failure.
    async fn authenticate(&self) -> ClientResult<()>;

    /// Invalidates the current session server-side. Local session state is
    /// left as-is; callers discard the client afterwards.
    async fn delete_session(&self) -> ClientResult<()>;

    /// Fetches the node's version report. Informational only.
    async fn get_version(&self) -> ClientResult<VersionResponse>;

    /// Downloads the teleporter export archive.
    async fn get_teleporter(&self) -> ClientResult<Vec<u8>>;

    /// Uploads a teleporter archive. With `import` set, only the categories
    /// it enables are applied; without it the node applies everything.
    async fn post_teleporter(
        &self,
        payload: &[u8],
        import: Option<&TeleporterImport>,
    ) -> ClientResult<()>;

    /// Fetches the full configuration document.
    async fn get_config(&self) -> ClientResult<ConfigResponse>;

    /// Applies a partial configuration document as a merge patch.
    async fn patch_config(&self, patch: &PatchConfigRequest) -> ClientResult<()>;
}
