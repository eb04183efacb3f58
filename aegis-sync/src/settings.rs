//! Selective-sync settings.
//!
//! Two independent toggle groups describe what a manual sync replicates:
//! gravity categories carried through the teleporter archive, and top-level
//! config sections carried through a config patch. Full sync ignores both.

use crate::client::model::{
    ConfigResponse, GravityImport, PatchConfig, PatchConfigRequest, TeleporterImport,
};
use tracing::warn;

/// What a manual sync replicates. Everything defaults to off; an absent
/// toggle means "do not replicate this piece".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSettings {
    pub gravity: GravitySettings,
    pub config: ConfigSettings,
}

/// Teleporter category toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GravitySettings {
    pub dhcp_leases: bool,
    pub group: bool,
    pub adlist: bool,
    pub adlist_by_group: bool,
    pub domainlist: bool,
    pub domainlist_by_group: bool,
    pub client: bool,
    pub client_by_group: bool,
}

impl GravitySettings {
    /// Builds the import filter sent alongside a teleporter upload. The
    /// embedded `config` toggle is always false: config sections travel via
    /// the config patch, never through a teleporter import.
    pub fn to_import(&self) -> TeleporterImport {
        TeleporterImport {
            config: false,
            dhcp_leases: self.dhcp_leases,
            gravity: GravityImport {
                group: self.group,
                adlist: self.adlist,
                adlist_by_group: self.adlist_by_group,
                domainlist: self.domainlist,
                domainlist_by_group: self.domainlist_by_group,
                client: self.client,
                client_by_group: self.client_by_group,
            },
        }
    }
}

/// Config section toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSettings {
    pub dns: bool,
    pub dhcp: bool,
    pub ntp: bool,
    pub resolver: bool,
    pub database: bool,
    pub misc: bool,
    pub debug: bool,
}

impl ConfigSettings {
    /// Builds the patch for the replicas: exactly the enabled sections,
    /// each copied verbatim out of the primary's document. Disabled
    /// sections are omitted from the patch entirely. An enabled section the
    /// source document does not carry is skipped with a warning.
    pub fn build_patch(&self, source: &ConfigResponse) -> PatchConfigRequest {
        let mut patch = PatchConfig::default();
        let sections = [
            (self.dns, "dns", &mut patch.dns),
            (self.dhcp, "dhcp", &mut patch.dhcp),
            (self.ntp, "ntp", &mut patch.ntp),
            (self.resolver, "resolver", &mut patch.resolver),
            (self.database, "database", &mut patch.database),
            (self.misc, "misc", &mut patch.misc),
            (self.debug, "debug", &mut patch.debug),
        ];
        for (enabled, key, slot) in sections {
            if !enabled {
                continue;
            }
            match source.config.get(key) {
                Some(value) => *slot = Some(value.clone()),
                None => warn!(section = key, "Enabled config section missing from source"),
            }
        }
        PatchConfigRequest { config: patch }
    }
}
