//! Status change handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use emend::review::{ReviewSummary, SuggestionStatus};
use emend::suggestion::{Category, SuggestionId};
use emend::BatchId;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request body for setting a suggestion's status.
#[derive(Deserialize)]
pub struct StatusRequest {
    pub batch: BatchId,
    pub status: SuggestionStatus,
}

/// Response after a status change.
#[derive(Serialize)]
pub struct StatusResponse {
    pub batch: BatchId,
    pub id: SuggestionId,
    pub status: SuggestionStatus,
    pub rendered: String,
    pub summary: ReviewSummary,
}

/// POST /api/suggestions/:id/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let mut session = state.session.write().await;
    let id = SuggestionId(id);

    let rendered = session.set_status(req.batch, id, req.status)?;
    let summary = session.layer(req.batch)?.summary.clone();
    drop(session);

    if state.auto_save {
        state.save().await?;
    }

    Ok(Json(StatusResponse {
        batch: req.batch,
        id,
        status: req.status,
        rendered,
        summary,
    }))
}

/// Request body for a bulk transition.
#[derive(Deserialize)]
pub struct TransitionRequest {
    pub batch: BatchId,
    pub from: SuggestionStatus,
    pub to: SuggestionStatus,
    pub category: Option<String>,
}

/// Response after a bulk transition.
#[derive(Serialize)]
pub struct TransitionResponse {
    pub batch: BatchId,
    pub rendered: String,
    pub summary: ReviewSummary,
}

/// POST /api/batch/transition
pub async fn batch_transition(
    State(state): State<AppState>,
    Json(req): Json<TransitionRequest>,
) -> Result<Json<TransitionResponse>, ApiError> {
    let category = match req.category.as_deref() {
        Some(name) => Some(
            Category::parse(name)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown category: {}", name)))?,
        ),
        None => None,
    };

    let mut session = state.session.write().await;
    let rendered = session.bulk_transition_in(req.batch, req.from, req.to, category)?;
    let summary = session.layer(req.batch)?.summary.clone();
    drop(session);

    if state.auto_save {
        state.save().await?;
    }

    Ok(Json(TransitionResponse {
        batch: req.batch,
        rendered,
        summary,
    }))
}
