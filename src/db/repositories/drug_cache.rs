use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::warn;

use crate::entities::{drug_cache, prelude::*};
use crate::models::drug::DrugSummary;

use crate::db::timestamp;

pub struct DrugCacheRepository {
    conn: DatabaseConnection,
}

impl DrugCacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns the cached summary for `query` unless it has expired.
    pub async fn get(&self, query: &str) -> Result<Option<DrugSummary>> {
        let now = timestamp(chrono::Utc::now());

        // Opportunistic cleanup; the scheduled purge catches the rest.
        if let Err(e) = DrugCache::delete_many()
            .filter(drug_cache::Column::ExpiresAt.lte(now.as_str()))
            .exec(&self.conn)
            .await
        {
            warn!(error = %e, "Failed to purge expired cache entries");
        }

        let entry = DrugCache::find()
            .filter(drug_cache::Column::Query.eq(query))
            .filter(drug_cache::Column::ExpiresAt.gt(now.as_str()))
            .one(&self.conn)
            .await
            .context("Failed to query drug cache")?;

        entry
            .map(|e| {
                serde_json::from_str::<DrugSummary>(&e.payload_json)
                    .with_context(|| format!("Corrupt cache payload for '{query}'"))
            })
            .transpose()
    }

    /// Inserts or replaces the entry for `query`. The last writer wins.
    pub async fn put(
        &self,
        query: &str,
        summary: &DrugSummary,
        ttl: chrono::Duration,
    ) -> Result<()> {
        let payload_json = serde_json::to_string(summary)?;
        let now = chrono::Utc::now();

        let active_model = drug_cache::ActiveModel {
            query: Set(query.to_string()),
            payload_json: Set(payload_json),
            created_at: Set(timestamp(now)),
            expires_at: Set(timestamp(now + ttl)),
            ..Default::default()
        };

        DrugCache::insert(active_model)
            .on_conflict(
                OnConflict::column(drug_cache::Column::Query)
                    .update_columns([
                        drug_cache::Column::PayloadJson,
                        drug_cache::Column::CreatedAt,
                        drug_cache::Column::ExpiresAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await
            .context("Failed to write drug cache entry")?;

        Ok(())
    }

    pub async fn clear(&self) -> Result<u64> {
        let result = DrugCache::delete_many()
            .exec(&self.conn)
            .await
            .context("Failed to clear drug cache")?;
        Ok(result.rows_affected)
    }

    pub async fn purge_expired(&self) -> Result<u64> {
        let now = timestamp(chrono::Utc::now());
        let result = DrugCache::delete_many()
            .filter(drug_cache::Column::ExpiresAt.lte(now))
            .exec(&self.conn)
            .await
            .context("Failed to purge expired cache entries")?;
        Ok(result.rows_affected)
    }

    pub async fn count(&self) -> Result<u64> {
        use sea_orm::PaginatorTrait;

        DrugCache::find()
            .count(&self.conn)
            .await
            .context("Failed to count cache entries")
    }
}
