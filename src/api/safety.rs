use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use super::{ApiError, AppState, InteractionCheckRequest};
use crate::models::interaction::InteractionResult;

pub async fn check_interactions(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InteractionCheckRequest>, JsonRejection>,
) -> Result<Json<InteractionResult>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let drugs = request.drugs.unwrap_or_default();
    let result = state.shared.interactions.check(&drugs).await?;

    Ok(Json(result))
}
