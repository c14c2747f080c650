use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::cabinet::SavedMedicine;
use crate::models::drug::DrugSummary;
use crate::models::interaction::DocumentedInteraction;
use crate::models::medicine::Medicine;

pub mod migrator;
pub mod repositories;

/// Fixed-width RFC 3339 so stored timestamps compare correctly as text.
#[must_use]
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    /// Single-connection in-memory database; every pooled connection to
    /// `sqlite::memory:` would otherwise see its own empty database.
    pub async fn in_memory() -> Result<Self> {
        Self::with_pool_options("sqlite::memory:", 1, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !db_url.contains(":memory:") {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn drug_cache_repo(&self) -> repositories::drug_cache::DrugCacheRepository {
        repositories::drug_cache::DrugCacheRepository::new(self.conn.clone())
    }

    fn cabinet_repo(&self) -> repositories::cabinet::CabinetRepository {
        repositories::cabinet::CabinetRepository::new(self.conn.clone())
    }

    fn catalog_repo(&self) -> repositories::catalog::CatalogRepository {
        repositories::catalog::CatalogRepository::new(self.conn.clone())
    }

    pub async fn get_cached_summary(&self, query: &str) -> Result<Option<DrugSummary>> {
        self.drug_cache_repo().get(query).await
    }

    pub async fn cache_summary(
        &self,
        query: &str,
        summary: &DrugSummary,
        ttl: chrono::Duration,
    ) -> Result<()> {
        self.drug_cache_repo().put(query, summary, ttl).await
    }

    pub async fn clear_drug_cache(&self) -> Result<u64> {
        self.drug_cache_repo().clear().await
    }

    pub async fn purge_expired_cache(&self) -> Result<u64> {
        self.drug_cache_repo().purge_expired().await
    }

    pub async fn count_cached_summaries(&self) -> Result<u64> {
        self.drug_cache_repo().count().await
    }

    pub async fn list_cabinet(&self, owner: &str) -> Result<Vec<SavedMedicine>> {
        self.cabinet_repo().list(owner).await
    }

    pub async fn find_cabinet_entry(
        &self,
        owner: &str,
        brand_name: &str,
    ) -> Result<Option<SavedMedicine>> {
        self.cabinet_repo().find_by_brand(owner, brand_name).await
    }

    pub async fn add_cabinet_entry(
        &self,
        owner: &str,
        brand_name: &str,
        generic_name: Option<&str>,
        details: &serde_json::Value,
    ) -> Result<Option<SavedMedicine>> {
        self.cabinet_repo()
            .insert(owner, brand_name, generic_name, details)
            .await
    }

    pub async fn remove_cabinet_entry(&self, owner: &str, id: i32) -> Result<bool> {
        self.cabinet_repo().remove(owner, id).await
    }

    pub async fn list_medicines(&self) -> Result<Vec<Medicine>> {
        self.catalog_repo().list_medicines().await
    }

    pub async fn list_documented_interactions(&self) -> Result<Vec<DocumentedInteraction>> {
        self.catalog_repo().list_interactions().await
    }
}
