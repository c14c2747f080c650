use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::HeaderMap,
};
use std::sync::Arc;

use super::validation::{cabinet_owner, validate_entry_id};
use super::{ApiError, AppState};
use crate::models::cabinet::{NewSavedMedicine, SavedMedicine};

pub async fn get_cabinet(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<SavedMedicine>>, ApiError> {
    let owner = cabinet_owner(&headers)?;
    let cabinet = state.shared.cabinet.list(&owner).await?;
    Ok(Json(cabinet))
}

pub async fn add_to_cabinet(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<NewSavedMedicine>, JsonRejection>,
) -> Result<Json<Vec<SavedMedicine>>, ApiError> {
    let owner = cabinet_owner(&headers)?;
    let Json(entry) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let cabinet = state.shared.cabinet.save(&owner, &entry).await?;
    Ok(Json(cabinet))
}

pub async fn remove_from_cabinet(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Json<Vec<SavedMedicine>>, ApiError> {
    let owner = cabinet_owner(&headers)?;
    let id = validate_entry_id(id)?;

    let cabinet = state.shared.cabinet.remove(&owner, id).await?;
    Ok(Json(cabinet))
}
