//! Review state handlers.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use emend::review::{ReviewLayer, ReviewSummary, SuggestionStatus};
use emend::suggestion::{Category, SuggestionId};
use emend::{BatchId, DocumentEntry, EmendError, ReadabilityMetrics, Segment};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response containing the full review state.
#[derive(Serialize)]
pub struct ReviewResponse {
    pub batch: BatchId,
    pub document: DocumentInfo,
    pub rendered: String,
    pub reference: String,
    pub suggestions: Vec<SuggestionInfo>,
    pub segments: Vec<Segment>,
    pub summary: ReviewSummary,
    pub readability: ReadabilityMetrics,
    pub progress: f64,
}

#[derive(Serialize)]
pub struct DocumentInfo {
    pub id: String,
    pub file: String,
    pub format: String,
    pub decoded: bool,
    pub text: String,
}

#[derive(Serialize)]
pub struct SuggestionInfo {
    pub id: SuggestionId,
    pub start: usize,
    pub end: usize,
    pub original: String,
    pub replacement: String,
    pub category: Category,
    pub rationale: String,
    pub status: SuggestionStatus,
}

impl ReviewResponse {
    pub fn build(batch: BatchId, layer: &ReviewLayer) -> Result<Self, EmendError> {
        let source = layer.document.source();

        Ok(Self {
            batch,
            document: DocumentInfo {
                id: layer.document.id().to_string(),
                file: source.file.clone(),
                format: source.format.clone(),
                decoded: source.decoded,
                text: layer.document.text().to_string(),
            },
            rendered: layer.rendered()?,
            reference: layer.reference().to_string(),
            suggestions: layer
                .ledger
                .entries()
                .map(|(s, status)| SuggestionInfo {
                    id: s.id,
                    start: s.start,
                    end: s.end,
                    original: s.original.clone(),
                    replacement: s.replacement.clone(),
                    category: s.category,
                    rationale: s.rationale.clone(),
                    status,
                })
                .collect(),
            segments: layer.segments()?,
            summary: layer.summary.clone(),
            readability: layer.readability,
            progress: layer.progress(),
        })
    }
}

/// GET /api/review - Get the full review state.
pub async fn get_review(State(state): State<AppState>) -> Result<Json<ReviewResponse>, ApiError> {
    let session = state.session.read().await;
    let batch = session
        .current_batch()
        .ok_or_else(|| ApiError::NotFound("No document under review".to_string()))?;

    Ok(Json(ReviewResponse::build(batch, session.layer(batch)?)?))
}

/// Request body for analyzing new text.
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// POST /api/analyze - Replace the document under review.
///
/// Analysis runs off the async runtime; if another analyze request starts
/// before this one finishes, this one is discarded with 409.
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let (ticket, emend) = {
        let mut session = state.session.write().await;
        (session.begin_ingestion(req.text), session.emend().clone())
    };

    let document = ticket.document().clone();
    let outcome = tokio::task::spawn_blocking(move || emend.analyze(document)).await;

    let mut session = state.session.write().await;
    let result = match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            session.abandon_ingestion(ticket);
            return Err(e.into());
        }
        Err(e) => {
            session.abandon_ingestion(ticket);
            return Err(ApiError::Internal(format!("Analysis task failed: {}", e)));
        }
    };
    let batch = session.complete_ingestion(ticket, result).ok_or_else(|| {
        ApiError::Conflict("Analysis superseded by a newer document".to_string())
    })?;
    let response = ReviewResponse::build(batch, session.layer(batch)?)?;
    drop(session);

    if state.auto_save {
        state.save().await?;
    }

    Ok(Json(response))
}

/// POST /api/demo - Review the bundled sample report.
pub async fn load_demo(State(state): State<AppState>) -> Result<Json<ReviewResponse>, ApiError> {
    let mut session = state.session.write().await;
    let batch = session.load_demo()?;
    let response = ReviewResponse::build(batch, session.layer(batch)?)?;
    drop(session);

    if state.auto_save {
        state.save().await?;
    }

    Ok(Json(response))
}

/// GET /api/documents - Every document ingested this session.
pub async fn list_documents(State(state): State<AppState>) -> Json<Vec<DocumentEntry>> {
    let session = state.session.read().await;
    Json(session.documents().to_vec())
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub batch: Option<BatchId>,
}

/// GET /api/export - Download the rendered document.
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.session.read().await;
    let batch = query
        .batch
        .or_else(|| session.current_batch())
        .ok_or_else(|| ApiError::NotFound("No document under review".to_string()))?;

    let bytes = session.export(batch)?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], bytes))
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub path: String,
}

/// POST /api/save - Force save the review file.
pub async fn save_review(State(state): State<AppState>) -> Result<Json<SaveResponse>, ApiError> {
    state.save().await?;
    info!(path = %state.review_path.display(), "saved on request");

    Ok(Json(SaveResponse {
        success: true,
        path: state.review_path.display().to_string(),
    }))
}
