//! Environment-driven configuration.
//!
//! Nodes, sync mode and schedule come from environment variables (loaded
//! from a `.env` file first when the CLI was given one):
//!
//! - `PRIMARY` (required): `<url>|<secret>` of the authoritative node
//! - `REPLICAS` (required): comma-separated `<url>|<secret>` list
//! - `FULL_SYNC` (required): `true` to replicate the whole export
//! - `CRON` (optional): cron schedule; absent means run once and exit
//! - `CLIENT_TIMEOUT_SECONDS` (optional, default 5): per-request timeout
//! - `SYNC_GRAVITY_*` / `SYNC_CONFIG_*` (optional, default false): the
//!   selective-sync toggles, only read when `FULL_SYNC=false`

use aegis_sync::{ConfigSettings, GravitySettings, SyncSettings};
use aegis_types::Node;
use cron::Schedule;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_CLIENT_TIMEOUT_SECONDS: u64 = 5;

/// A configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required env var {0} is not set")]
    Missing(&'static str),

    #[error("env var {name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Everything the run loop needs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub primary: Node,
    pub replicas: Vec<Node>,
    pub full_sync: bool,
    /// Parsed cron schedule; `None` means a single immediate run.
    pub cron: Option<Schedule>,
    pub client_timeout: Duration,
    /// Present exactly when `full_sync` is false.
    pub sync_settings: Option<SyncSettings>,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let primary = parse_var("PRIMARY", &require("PRIMARY")?)?;
        let replicas = parse_replicas(&require("REPLICAS")?)?;
        let full_sync: bool = parse_var("FULL_SYNC", &require("FULL_SYNC")?)?;

        let cron = match optional("CRON") {
            Some(expr) => Some(parse_cron(&expr)?),
            None => None,
        };

        let client_timeout = match optional("CLIENT_TIMEOUT_SECONDS") {
            Some(raw) => Duration::from_secs(parse_var("CLIENT_TIMEOUT_SECONDS", &raw)?),
            None => Duration::from_secs(DEFAULT_CLIENT_TIMEOUT_SECONDS),
        };

        let sync_settings = if full_sync {
            None
        } else {
            Some(load_sync_settings()?)
        };

        Ok(Self {
            primary,
            replicas,
            full_sync,
            cron,
            client_timeout,
            sync_settings,
        })
    }
}

impl fmt::Display for Config {
    /// A settings summary safe to log: node secrets never appear.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let replicas: Vec<String> = self.replicas.iter().map(|r| r.to_string()).collect();
        write!(
            f,
            "primary={}, replicas=[{}], full_sync={}, cron={}",
            self.primary,
            replicas.join(", "),
            self.full_sync,
            self.cron
                .as_ref()
                .map_or_else(|| "none".to_string(), |s| s.to_string()),
        )?;
        if let Some(settings) = &self.sync_settings {
            write!(
                f,
                ", gravity={:?}, config={:?}",
                settings.gravity, settings.config
            )?;
        }
        Ok(())
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}

fn parse_replicas(raw: &str) -> Result<Vec<Node>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_var("REPLICAS", s))
        .collect()
}

/// Parses a cron schedule, accepting the standard five-field form by
/// prepending the seconds field the parser wants.
fn parse_cron(expr: &str) -> Result<Schedule, ConfigError> {
    let expr = expr.trim();
    let normalized = if expr.split_whitespace().count() == 5 {
        format!("0 {expr}")
    } else {
        expr.to_string()
    };
    Schedule::from_str(&normalized).map_err(|e| ConfigError::Invalid {
        name: "CRON",
        reason: e.to_string(),
    })
}

fn load_sync_settings() -> Result<SyncSettings, ConfigError> {
    Ok(SyncSettings {
        gravity: GravitySettings {
            dhcp_leases: toggle("SYNC_GRAVITY_DHCP_LEASES")?,
            group: toggle("SYNC_GRAVITY_GROUP")?,
            adlist: toggle("SYNC_GRAVITY_AD_LIST")?,
            adlist_by_group: toggle("SYNC_GRAVITY_AD_LIST_BY_GROUP")?,
            domainlist: toggle("SYNC_GRAVITY_DOMAIN_LIST")?,
            domainlist_by_group: toggle("SYNC_GRAVITY_DOMAIN_LIST_BY_GROUP")?,
            client: toggle("SYNC_GRAVITY_CLIENT")?,
            client_by_group: toggle("SYNC_GRAVITY_CLIENT_BY_GROUP")?,
        },
        config: ConfigSettings {
            dns: toggle("SYNC_CONFIG_DNS")?,
            dhcp: toggle("SYNC_CONFIG_DHCP")?,
            ntp: toggle("SYNC_CONFIG_NTP")?,
            resolver: toggle("SYNC_CONFIG_RESOLVER")?,
            database: toggle("SYNC_CONFIG_DATABASE")?,
            misc: toggle("SYNC_CONFIG_MISC")?,
            debug: toggle("SYNC_CONFIG_DEBUG")?,
        },
    })
}

/// A boolean toggle: absent means false.
fn toggle(name: &'static str) -> Result<bool, ConfigError> {
    match optional(name) {
        Some(raw) => parse_var(name, &raw),
        None => Ok(false),
    }
}
