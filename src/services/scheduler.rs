use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, interval};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::config::CacheConfig;
use crate::db::Store;

/// Background job that deletes expired drug cache rows.
pub struct CachePurgeScheduler {
    store: Store,
    config: CacheConfig,
    running: Arc<RwLock<bool>>,
}

async fn purge(store: &Store) {
    let start = std::time::Instant::now();
    info!(event = "job_started", job_name = "purge_drug_cache", "Starting cache purge");

    match store.purge_expired_cache().await {
        Ok(removed) => info!(
            event = "job_finished",
            job_name = "purge_drug_cache",
            removed,
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Cache purge finished"
        ),
        Err(e) => error!(
            event = "job_failed",
            job_name = "purge_drug_cache",
            error = %e,
            "Cache purge failed"
        ),
    }
}

impl CachePurgeScheduler {
    #[must_use]
    pub fn new(store: Store, config: CacheConfig) -> Self {
        Self {
            store,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn start(&self) -> Result<()> {
        if !self.config.purge_enabled {
            info!("Cache purge is disabled in config");
            return Ok(());
        }

        *self.running.write().await = true;
        info!("Starting cache purge scheduler");

        if let Some(cron_expr) = &self.config.purge_cron {
            self.run_with_cron(cron_expr).await
        } else {
            self.run_with_interval().await
        }
    }

    async fn run_with_cron(&self, cron_expr: &str) -> Result<()> {
        let mut sched = JobScheduler::new().await?;

        let store = self.store.clone();
        let running = Arc::clone(&self.running);
        let job = Job::new_async(cron_expr, move |_uuid, _lock| {
            let store = store.clone();
            let running = Arc::clone(&running);
            Box::pin(async move {
                if !*running.read().await {
                    return;
                }
                purge(&store).await;
            })
        })?;

        sched.add(job).await?;
        sched.start().await?;

        info!("Cache purge running with cron: {}", cron_expr);

        loop {
            if !*self.running.read().await {
                break;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        sched.shutdown().await?;
        Ok(())
    }

    async fn run_with_interval(&self) -> Result<()> {
        let interval_mins = self.config.purge_interval_minutes.max(1);
        info!("Cache purge running every {}m", interval_mins);

        let mut ticker = interval(Duration::from_secs(u64::from(interval_mins) * 60));

        loop {
            ticker.tick().await;
            if !*self.running.read().await {
                break;
            }
            purge(&self.store).await;
        }

        Ok(())
    }

    pub async fn stop(&self) {
        info!("Stopping cache purge scheduler...");
        *self.running.write().await = false;
    }

    pub async fn run_once(&self) -> Result<u64> {
        info!("Running manual cache purge...");
        self.store.purge_expired_cache().await
    }
}
