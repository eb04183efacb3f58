//! An in-memory node double for orchestrator tests.

use super::model::{
    ConfigResponse, PatchConfigRequest, TeleporterImport, VersionResponse,
};
use super::NodeApi;
use crate::error::{ClientError, ClientResult, SessionError};
use async_trait::async_trait;
use serde_json::Map;
use std::collections::HashSet;
use std::sync::Mutex;

/// A scriptable [`NodeApi`] implementation.
///
/// Records every call in order, tracks whether the node was authenticated
/// (so teardown behaves like the real client: logging out a node that never
/// logged in fails locally), and can be told to fail any one operation.
pub struct MockNode {
    identity: String,
    calls: Mutex<Vec<String>>,
    fail_ops: Mutex<HashSet<&'static str>>,
    authenticated: Mutex<bool>,
    teleporter: Vec<u8>,
    config: Map<String, serde_json::Value>,
    last_import: Mutex<Option<Option<TeleporterImport>>>,
    last_patch: Mutex<Option<PatchConfigRequest>>,
}

impl MockNode {
    /// Creates a healthy node answering every call.
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            calls: Mutex::new(Vec::new()),
            fail_ops: Mutex::new(HashSet::new()),
            authenticated: Mutex::new(false),
            teleporter: b"teleporter archive".to_vec(),
            config: Map::new(),
            last_import: Mutex::new(None),
            last_patch: Mutex::new(None),
        }
    }

    /// Sets the teleporter payload this node serves.
    pub fn with_teleporter(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.teleporter = payload.into();
        self
    }

    /// Sets the config document this node serves.
    pub fn with_config(mut self, config: Map<String, serde_json::Value>) -> Self {
        self.config = config;
        self
    }

    /// Makes the named operation fail with a protocol error.
    /// Operation names match the trait methods, e.g. `"authenticate"`.
    pub fn fail_on(self, op: &'static str) -> Self {
        self.fail_ops.lock().unwrap().insert(op);
        self
    }

    /// The calls observed so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times the named operation was called.
    pub fn call_count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == op).count()
    }

    /// The import filter passed to the last `post_teleporter`, if any call
    /// happened (`Some(None)` means "uploaded without a filter").
    pub fn last_import(&self) -> Option<Option<TeleporterImport>> {
        self.last_import.lock().unwrap().clone()
    }

    /// The patch passed to the last `patch_config`.
    pub fn last_patch(&self) -> Option<PatchConfigRequest> {
        self.last_patch.lock().unwrap().clone()
    }

    fn record(&self, op: &'static str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(op.to_string());
        if self.fail_ops.lock().unwrap().contains(op) {
            return Err(ClientError::Status {
                url: format!("{}/api/{op}", self.identity),
                status: 500,
            });
        }
        Ok(())
    }

    fn require_session(&self) -> ClientResult<()> {
        if !*self.authenticated.lock().unwrap() {
            return Err(ClientError::Session {
                node: self.identity.clone(),
                source: SessionError::Missing,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl NodeApi for MockNode {
    fn identity(&self) -> String {
        self.identity.clone()
    }

    async fn authenticate(&self) -> ClientResult<()> {
        self.record("authenticate")?;
        *self.authenticated.lock().unwrap() = true;
        Ok(())
    }

    async fn delete_session(&self) -> ClientResult<()> {
        self.require_session()?;
        self.record("delete_session")
    }

    async fn get_version(&self) -> ClientResult<VersionResponse> {
        self.require_session()?;
        self.record("get_version")?;
        Ok(VersionResponse::default())
    }

    async fn get_teleporter(&self) -> ClientResult<Vec<u8>> {
        self.require_session()?;
        self.record("get_teleporter")?;
        Ok(self.teleporter.clone())
    }

    async fn post_teleporter(
        &self,
        _payload: &[u8],
        import: Option<&TeleporterImport>,
    ) -> ClientResult<()> {
        self.require_session()?;
        self.record("post_teleporter")?;
        *self.last_import.lock().unwrap() = Some(import.cloned());
        Ok(())
    }

    async fn get_config(&self) -> ClientResult<ConfigResponse> {
        self.require_session()?;
        self.record("get_config")?;
        Ok(ConfigResponse {
            config: self.config.clone(),
        })
    }

    async fn patch_config(&self, patch: &PatchConfigRequest) -> ClientResult<()> {
        self.require_session()?;
        self.record("patch_config")?;
        *self.last_patch.lock().unwrap() = Some(patch.clone());
        Ok(())
    }
}
