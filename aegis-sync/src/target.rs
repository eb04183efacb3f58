//! Sync orchestration over one primary and an ordered list of replicas.

use crate::client::model::TeleporterImport;
use crate::client::NodeApi;
use crate::error::{ClientError, SyncError, SyncResult};
use crate::settings::{ConfigSettings, GravitySettings, SyncSettings};
use std::sync::Arc;
use tracing::{info, warn};

/// The set of nodes one sync run operates on.
///
/// Construction fixes the replica order; every phase walks the primary
/// first and then the replicas in that order, one node at a time. Replicas
/// are never contacted concurrently and the first failing call ends the
/// phase (first error wins). Teardown is best-effort: every node that holds
/// a session gets a logout attempt even when an earlier phase failed, so no
/// run leaves sessions open on nodes it already reached.
pub struct Target {
    primary: Arc<dyn NodeApi>,
    replicas: Vec<Arc<dyn NodeApi>>,
}

impl Target {
    /// Creates a target from a primary and its replicas, keeping order.
    pub fn new(primary: Arc<dyn NodeApi>, replicas: Vec<Arc<dyn NodeApi>>) -> Self {
        Self { primary, replicas }
    }

    /// Replicates the entire teleporter export verbatim onto every replica.
    pub async fn full_sync(&self) -> SyncResult<()> {
        info!(replicas = self.replicas.len(), "Running full sync");
        let outcome = self.run_full().await;
        self.teardown(outcome).await
    }

    /// Replicates only the teleporter categories and config sections
    /// enabled in `settings`.
    pub async fn manual_sync(&self, settings: &SyncSettings) -> SyncResult<()> {
        info!(replicas = self.replicas.len(), "Running manual sync");
        let outcome = self.run_manual(settings).await;
        self.teardown(outcome).await
    }

    async fn run_full(&self) -> SyncResult<()> {
        self.authenticate_all().await?;
        self.sync_teleporters(None).await?;
        Ok(())
    }

    async fn run_manual(&self, settings: &SyncSettings) -> SyncResult<()> {
        self.authenticate_all().await?;
        self.sync_teleporters(Some(&settings.gravity)).await?;
        self.sync_configs(&settings.config).await?;
        Ok(())
    }

    /// Opens a session on the primary, then on each replica in order.
    async fn authenticate_all(&self) -> SyncResult<()> {
        info!("Authenticating clients...");
        self.primary
            .authenticate()
            .await
            .map_err(SyncError::Authentication)?;

        for replica in &self.replicas {
            replica
                .authenticate()
                .await
                .map_err(SyncError::Authentication)?;
        }

        Ok(())
    }

    /// Copies the primary's teleporter export to each replica. With gravity
    /// settings supplied the upload carries an import filter; without them
    /// the replicas apply everything.
    async fn sync_teleporters(&self, gravity: Option<&GravitySettings>) -> SyncResult<()> {
        info!("Syncing teleporters...");
        let payload = self
            .primary
            .get_teleporter()
            .await
            .map_err(SyncError::Teleporter)?;

        let import: Option<TeleporterImport> = gravity.map(GravitySettings::to_import);

        for replica in &self.replicas {
            replica
                .post_teleporter(&payload, import.as_ref())
                .await
                .map_err(SyncError::Teleporter)?;
        }

        Ok(())
    }

    /// Fetches the primary's config document and patches the enabled
    /// sections onto each replica.
    async fn sync_configs(&self, sections: &ConfigSettings) -> SyncResult<()> {
        info!("Syncing configs...");
        let document = self
            .primary
            .get_config()
            .await
            .map_err(SyncError::Config)?;

        let patch = sections.build_patch(&document);

        for replica in &self.replicas {
            replica
                .patch_config(&patch)
                .await
                .map_err(SyncError::Config)?;
        }

        Ok(())
    }

    /// Invalidates sessions on every node, primary first, replicas in
    /// order. Nodes that never authenticated fail their local session check
    /// and are skipped. Runs on every path; a transfer-phase error takes
    /// precedence over any teardown failure in the returned result.
    async fn teardown(&self, outcome: SyncResult<()>) -> SyncResult<()> {
        info!("Invalidating sessions...");
        let mut first_failure: Option<ClientError> = None;

        for node in std::iter::once(&self.primary).chain(self.replicas.iter()) {
            match node.delete_session().await {
                Ok(()) => {}
                // Never authenticated: nothing to invalidate on this node.
                Err(ClientError::Session { .. }) => {}
                Err(e) => {
                    warn!(node = %node.identity(), error = %e, "Failed to invalidate session");
                    first_failure.get_or_insert(e);
                }
            }
        }

        match (outcome, first_failure) {
            (Err(e), _) => Err(e),
            (Ok(()), Some(e)) => Err(SyncError::Teardown(e)),
            (Ok(()), None) => Ok(()),
        }
    }
}
