use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::{interactions, medicines, prelude::*};
use crate::models::interaction::{DocumentedInteraction, Severity};
use crate::models::medicine::Medicine;

impl From<medicines::Model> for Medicine {
    fn from(model: medicines::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            active_ingredient: model.active_ingredient,
            description: model.description,
            simplified_description: model.simplified_description,
            common_side_effects: serde_json::from_str(&model.common_side_effects)
                .unwrap_or_default(),
            warnings: serde_json::from_str(&model.warnings).unwrap_or_default(),
        }
    }
}

impl From<interactions::Model> for DocumentedInteraction {
    fn from(model: interactions::Model) -> Self {
        Self {
            id: model.id,
            drug_a: model.drug_a,
            drug_b: model.drug_b,
            severity: Severity::parse(&model.severity).unwrap_or(Severity::Low),
            description: model.description,
            recommendation: model.recommendation,
        }
    }
}

/// Read-only reference data seeded by migration.
pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_medicines(&self) -> Result<Vec<Medicine>> {
        let rows = Medicines::find()
            .order_by_asc(medicines::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list medicines")?;

        Ok(rows.into_iter().map(Medicine::from).collect())
    }

    pub async fn list_interactions(&self) -> Result<Vec<DocumentedInteraction>> {
        let rows = Interactions::find()
            .order_by_asc(interactions::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list documented interactions")?;

        Ok(rows.into_iter().map(DocumentedInteraction::from).collect())
    }
}
