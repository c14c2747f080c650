use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;
use tracing::info;

use super::validation::validate_search_query;
use super::{ApiError, AppState, MessageResponse, SearchParams};
use crate::models::drug::DrugSummary;

/// Returns a one-element list so clients can treat search results uniformly.
pub async fn search_drug(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<DrugSummary>>, ApiError> {
    let query = validate_search_query(params.query.as_deref())?;

    let outcome = state.shared.drug_search.search(query).await?;

    outcome
        .into_summary()
        .map(|summary| Json(vec![summary]))
        .ok_or_else(|| ApiError::NotFound("No drugs found.".to_string()))
}

pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state
        .store()
        .clear_drug_cache()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    info!(removed, "Drug cache cleared");
    Ok(Json(MessageResponse::new("Cache cleared.")))
}
