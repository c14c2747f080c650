use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::validation::validate_letter;
use super::{ApiError, AppState, CatalogParams};
use crate::models::medicine::Medicine;

pub async fn list_medicines(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<Vec<Medicine>>, ApiError> {
    let letter = params
        .letter
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .map(validate_letter)
        .transpose()?;

    let medicines = state
        .store()
        .list_medicines()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    let medicines = match letter {
        Some(letter) => medicines
            .into_iter()
            .filter(|m| {
                m.name
                    .chars()
                    .next()
                    .is_some_and(|c| c.to_ascii_uppercase() == letter)
            })
            .collect(),
        None => medicines,
    };

    Ok(Json(medicines))
}
