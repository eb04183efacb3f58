//! Sync engine for Aegis appliances.
//!
//! Replicates the configuration of one authoritative appliance (the
//! *primary*) onto an ordered list of secondary appliances (*replicas*) by
//! driving each node's session-authenticated HTTP API.
//!
//! # Components
//!
//! - **Client**: the [`NodeApi`] capability trait and its reqwest-backed
//!   implementation [`HttpNodeClient`]: login, logout, teleporter
//!   export/import, config fetch/patch, version probe.
//! - **Settings**: [`SyncSettings`], which teleporter categories and which
//!   config sections a manual sync replicates.
//! - **Target**: the [`Target`] orchestrator. Authenticates all nodes,
//!   transfers primary state to each replica, tears every session down.
//!
//! # Sync strategies
//!
//! - [`Target::full_sync`] copies the entire teleporter export verbatim.
//! - [`Target::manual_sync`] copies only the enabled teleporter categories
//!   and config sections.
//!
//! Both run their phases sequentially over the replica list and stop at the
//! first failure; session teardown is attempted on every authenticated node
//! regardless of how the transfer phases ended.

pub mod client;
mod error;
pub mod settings;
mod target;

pub use client::{HttpNodeClient, NodeApi, Session, SessionError};
pub use error::{ClientError, ClientResult, SyncError, SyncResult};
pub use settings::{ConfigSettings, GravitySettings, SyncSettings};
pub use target::Target;
