//! Wire-level request and response bodies for the appliance API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Login request body.
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub password: &'a str,
}

/// Login response body.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub session: SessionInfo,
}

/// The session block of a login response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionInfo {
    pub valid: bool,
    pub totp: bool,
    pub sid: String,
    pub csrf: String,
    pub validity: i64,
    pub message: Option<String>,
}

/// Category toggles attached to a teleporter upload.
///
/// `config` stays false: a teleporter import never re-applies config
/// sections, only gravity categories and DHCP leases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeleporterImport {
    pub config: bool,
    pub dhcp_leases: bool,
    pub gravity: GravityImport,
}

/// Gravity category toggles within a teleporter import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravityImport {
    pub group: bool,
    pub adlist: bool,
    pub adlist_by_group: bool,
    pub domainlist: bool,
    pub domainlist_by_group: bool,
    pub client: bool,
    pub client_by_group: bool,
}

/// The full configuration document as fetched from a node. The tree is
/// opaque to the engine; only top-level section keys are ever looked at.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigResponse {
    pub config: Map<String, Value>,
}

/// A partial configuration document sent as a merge patch. Absent sections
/// are omitted from the JSON entirely, leaving the replica's value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchConfigRequest {
    pub config: PatchConfig,
}

/// The sections of a config patch. Each enabled section is copied verbatim
/// from the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dhcp: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ntp: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misc: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
}

/// Version report for one component, local and remote.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComponentVersion {
    pub local: VersionDetail,
    pub remote: VersionDetail,
}

/// A single version entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VersionDetail {
    pub branch: Option<String>,
    pub version: Option<String>,
    pub hash: Option<String>,
}

/// Docker image versions, reported as plain tags.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DockerVersion {
    pub local: Option<String>,
    pub remote: Option<String>,
}

/// The nested block of a version response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VersionInfo {
    pub core: ComponentVersion,
    pub web: ComponentVersion,
    pub ftl: ComponentVersion,
    pub docker: DockerVersion,
}

/// Version probe response. Informational; never on the sync critical path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VersionResponse {
    pub version: VersionInfo,
    pub took: f64,
}
