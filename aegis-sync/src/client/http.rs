//! HTTP-backed node client.
//!
//! One instance per appliance. The reqwest `Client` (connection pool and
//! request timeout) is constructed by the caller and injected, so tests and
//! the runtime control transport behavior in one place.

use super::model::{
    AuthRequest, AuthResponse, ConfigResponse, PatchConfigRequest, TeleporterImport,
    VersionResponse,
};
use super::session::Session;
use super::NodeApi;
use crate::error::{ClientError, ClientResult, SessionError};
use aegis_types::Node;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Response};
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

/// Fixed user-agent sent on every request.
const USER_AGENT: &str = concat!("aegis-sync/", env!("CARGO_PKG_VERSION"));

/// Header carrying the session id on protected calls.
const SESSION_HEADER: &str = "sid";

/// A node client speaking the appliance's HTTP API.
pub struct HttpNodeClient {
    node: Node,
    http: reqwest::Client,
    session: RwLock<Session>,
}

impl HttpNodeClient {
    /// Creates a client for `node` using the given transport.
    pub fn new(node: Node, http: reqwest::Client) -> Self {
        Self {
            node,
            http,
            session: RwLock::new(Session::default()),
        }
    }

    /// The node this client talks to.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Returns a verified copy of the session, or the local violation.
    async fn session(&self) -> ClientResult<Session> {
        let session = self.session.read().await.clone();
        session.verify().map_err(|e| self.session_error(e))?;
        Ok(session)
    }

    fn session_error(&self, source: SessionError) -> ClientError {
        ClientError::Session {
            node: self.node.to_string(),
            source,
        }
    }

    fn check_status(url: &Url, response: &Response) -> ClientResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(ClientError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }

    /// Sends a session-authenticated request with the fixed user-agent and
    /// classifies the status. The builder must already carry method + URL.
    async fn send_authed(
        &self,
        url: &Url,
        builder: reqwest::RequestBuilder,
    ) -> ClientResult<Response> {
        let session = self.session().await?;
        let response = builder
            .header(header::USER_AGENT, USER_AGENT)
            .header(SESSION_HEADER, session.sid)
            .send()
            .await
            .map_err(|e| ClientError::transport(url, e))?;
        Self::check_status(url, &response)?;
        Ok(response)
    }
}

#[async_trait]
impl NodeApi for HttpNodeClient {
    fn identity(&self) -> String {
        self.node.to_string()
    }

    async fn authenticate(&self) -> ClientResult<()> {
        debug!(node = %self.node, "Authenticate");
        let url = self.node.api_url("auth");

        let response = self
            .http
            .post(url.clone())
            .header(header::USER_AGENT, USER_AGENT)
            .json(&AuthRequest {
                password: self.node.secret(),
            })
            .send()
            .await
            .map_err(|e| ClientError::transport(&url, e))?;
        Self::check_status(&url, &response)?;

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| ClientError::decode(&url, e))?;

        // Store first, then verify: a login that came back unusable leaves
        // the client unusable too, like any other failed authentication.
        let mut session = self.session.write().await;
        *session = Session::from(auth.session);
        session.verify().map_err(|e| self.session_error(e))?;
        Ok(())
    }

    async fn delete_session(&self) -> ClientResult<()> {
        debug!(node = %self.node, "Delete session");
        let url = self.node.api_url("auth");
        self.send_authed(&url, self.http.delete(url.clone())).await?;
        Ok(())
    }

    async fn get_version(&self) -> ClientResult<VersionResponse> {
        debug!(node = %self.node, "Get version");
        let url = self.node.api_url("info/version");
        let response = self.send_authed(&url, self.http.get(url.clone())).await?;
        response.json().await.map_err(|e| ClientError::decode(&url, e))
    }

    async fn get_teleporter(&self) -> ClientResult<Vec<u8>> {
        debug!(node = %self.node, "Get teleporter");
        let url = self.node.api_url("teleporter");
        let response = self.send_authed(&url, self.http.get(url.clone())).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::transport(&url, e))?;
        Ok(bytes.to_vec())
    }

    async fn post_teleporter(
        &self,
        payload: &[u8],
        import: Option<&TeleporterImport>,
    ) -> ClientResult<()> {
        debug!(node = %self.node, ?import, "Post teleporter");
        let url = self.node.api_url("teleporter");

        let mut form = Form::new().part(
            "file",
            Part::bytes(payload.to_vec()).file_name("config.zip"),
        );
        if let Some(import) = import {
            form = form.text("import", serde_json::to_string(import)?);
        }

        self.send_authed(&url, self.http.post(url.clone()).multipart(form))
            .await?;
        Ok(())
    }

    async fn get_config(&self) -> ClientResult<ConfigResponse> {
        debug!(node = %self.node, "Get config");
        let url = self.node.api_url("config");
        let response = self.send_authed(&url, self.http.get(url.clone())).await?;
        response.json().await.map_err(|e| ClientError::decode(&url, e))
    }

    async fn patch_config(&self, patch: &PatchConfigRequest) -> ClientResult<()> {
        debug!(node = %self.node, "Patch config");
        let url = self.node.api_url("config");
        self.send_authed(&url, self.http.patch(url.clone()).json(patch))
            .await?;
        Ok(())
    }
}
