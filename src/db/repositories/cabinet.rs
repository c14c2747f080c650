use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

use crate::entities::{prelude::*, saved_medicines};
use crate::models::cabinet::SavedMedicine;

use crate::db::timestamp;

impl From<saved_medicines::Model> for SavedMedicine {
    fn from(model: saved_medicines::Model) -> Self {
        Self {
            id: model.id,
            brand_name: model.brand_name,
            generic_name: model.generic_name,
            details: serde_json::from_str(&model.details_json).unwrap_or(serde_json::Value::Null),
            created_at: model.created_at,
        }
    }
}

fn brand_key(brand_name: &str) -> String {
    brand_name.trim().to_lowercase()
}

pub struct CabinetRepository {
    conn: DatabaseConnection,
}

impl CabinetRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, owner: &str) -> Result<Vec<SavedMedicine>> {
        let rows = SavedMedicines::find()
            .filter(saved_medicines::Column::Owner.eq(owner))
            .order_by_asc(saved_medicines::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list cabinet")?;

        Ok(rows.into_iter().map(SavedMedicine::from).collect())
    }

    /// Case-insensitive brand-name lookup within one owner's cabinet.
    pub async fn find_by_brand(&self, owner: &str, brand_name: &str) -> Result<Option<SavedMedicine>> {
        let row = SavedMedicines::find()
            .filter(saved_medicines::Column::Owner.eq(owner))
            .filter(saved_medicines::Column::BrandKey.eq(brand_key(brand_name)))
            .one(&self.conn)
            .await
            .context("Failed to query cabinet")?;

        Ok(row.map(SavedMedicine::from))
    }

    /// `None` when the owner already has this brand, in any letter case.
    pub async fn insert(
        &self,
        owner: &str,
        brand_name: &str,
        generic_name: Option<&str>,
        details: &serde_json::Value,
    ) -> Result<Option<SavedMedicine>> {
        let inserted = saved_medicines::ActiveModel {
            owner: Set(owner.to_string()),
            brand_name: Set(brand_name.to_string()),
            brand_key: Set(brand_key(brand_name)),
            generic_name: Set(generic_name.map(ToString::to_string)),
            details_json: Set(details.to_string()),
            created_at: Set(timestamp(chrono::Utc::now())),
            ..Default::default()
        }
        .insert(&self.conn)
        .await;

        match inserted {
            Ok(model) => Ok(Some(SavedMedicine::from(model))),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(None),
            Err(e) => Err(e).context("Failed to save medicine"),
        }
    }

    /// Returns false when no entry with `id` belongs to `owner`.
    pub async fn remove(&self, owner: &str, id: i32) -> Result<bool> {
        let result = SavedMedicines::delete_many()
            .filter(saved_medicines::Column::Owner.eq(owner))
            .filter(saved_medicines::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to remove medicine")?;

        Ok(result.rows_affected > 0)
    }
}
