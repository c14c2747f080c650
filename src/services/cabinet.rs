use thiserror::Error;
use tracing::info;

use crate::db::Store;
use crate::models::cabinet::{NewSavedMedicine, SavedMedicine};

#[derive(Debug, Error)]
pub enum CabinetError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} is already in your cabinet")]
    Duplicate(String),

    #[error("Saved medicine {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for CabinetError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Per-owner list of saved drug summaries.
pub struct CabinetService {
    store: Store,
}

impl CabinetService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, owner: &str) -> Result<Vec<SavedMedicine>, CabinetError> {
        Ok(self.store.list_cabinet(owner).await?)
    }

    /// Saves an entry and returns the owner's updated cabinet.
    pub async fn save(
        &self,
        owner: &str,
        entry: &NewSavedMedicine,
    ) -> Result<Vec<SavedMedicine>, CabinetError> {
        let brand_name = entry.brand_name.trim();
        if brand_name.is_empty() {
            return Err(CabinetError::Validation("Brand name is required".to_string()));
        }

        if self
            .store
            .find_cabinet_entry(owner, brand_name)
            .await?
            .is_some()
        {
            return Err(CabinetError::Duplicate(brand_name.to_string()));
        }

        let generic_name = entry
            .generic_name
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty());

        // The pre-check can race a concurrent save; the unique index decides.
        let Some(saved) = self
            .store
            .add_cabinet_entry(owner, brand_name, generic_name, &entry.snapshot())
            .await?
        else {
            return Err(CabinetError::Duplicate(brand_name.to_string()));
        };
        info!(owner, id = saved.id, brand = %saved.brand_name, "Saved medicine to cabinet");

        self.list(owner).await
    }

    /// Removes an entry and returns the owner's updated cabinet.
    pub async fn remove(&self, owner: &str, id: i32) -> Result<Vec<SavedMedicine>, CabinetError> {
        if !self.store.remove_cabinet_entry(owner, id).await? {
            return Err(CabinetError::NotFound(id));
        }
        info!(owner, id, "Removed medicine from cabinet");

        self.list(owner).await
    }
}
