//! Wires configuration to the sync engine and drives it, once or on a
//! schedule.

use crate::config::Config;
use aegis_sync::{HttpNodeClient, NodeApi, SyncResult, Target};
use anyhow::Context;
use chrono::Utc;
use cron::Schedule;
use std::sync::Arc;
use tracing::{debug, error, info};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The running application: one target built from the loaded config.
pub struct Service {
    target: Target,
    conf: Config,
}

impl Service {
    /// Builds the node clients and the sync target.
    ///
    /// One HTTP transport (connection pool + request timeout) is
    /// constructed here and shared by every node client.
    pub fn new(conf: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(conf.client_timeout)
            .build()
            .context("failed to create HTTP client")?;

        let primary: Arc<dyn NodeApi> =
            Arc::new(HttpNodeClient::new(conf.primary.clone(), http.clone()));
        let replicas: Vec<Arc<dyn NodeApi>> = conf
            .replicas
            .iter()
            .map(|node| {
                Arc::new(HttpNodeClient::new(node.clone(), http.clone())) as Arc<dyn NodeApi>
            })
            .collect();

        Ok(Self {
            target: Target::new(primary, replicas),
            conf,
        })
    }

    /// Runs the sync once when no schedule is configured, otherwise loops
    /// on the cron schedule forever.
    pub async fn run(&self) -> anyhow::Result<()> {
        info!("Starting aegis-sync {VERSION}");
        debug!(config = %self.conf, "Settings");

        match self.conf.cron.clone() {
            None => {
                let result = self.sync_once().await;
                if let Err(e) = &result {
                    error!(error = %e, "Sync failed");
                }
                result.map_err(anyhow::Error::from).context("sync failed")
            }
            Some(schedule) => self.run_scheduled(&schedule).await,
        }
    }

    /// One sync pass with the configured strategy.
    async fn sync_once(&self) -> SyncResult<()> {
        if self.conf.full_sync {
            self.target.full_sync().await?;
        } else {
            // Settings are always loaded alongside full_sync=false.
            let settings = self.conf.sync_settings.clone().unwrap_or_default();
            self.target.manual_sync(&settings).await?;
        }

        info!("Sync complete");
        Ok(())
    }

    /// Runs the sync on every schedule occurrence. A failing pass is logged
    /// and the loop continues. Passes never overlap: the next occurrence is
    /// computed only after the previous pass returned, so triggers that
    /// fire mid-pass are skipped.
    async fn run_scheduled(&self, schedule: &Schedule) -> anyhow::Result<()> {
        info!(schedule = %schedule, "Scheduling sync");

        loop {
            let Some(next) = schedule.upcoming(Utc).next() else {
                // A schedule with no future occurrence (e.g. a fixed date
                // in the past) has nothing left to do.
                info!("Schedule has no upcoming runs, stopping");
                return Ok(());
            };

            let wait = (next - Utc::now())
                .to_std()
                .unwrap_or(std::time::Duration::ZERO);
            debug!(next = %next, "Waiting for next run");
            tokio::time::sleep(wait).await;

            if let Err(e) = self.sync_once().await {
                error!(error = %e, "Sync failed");
            }
        }
    }
}
