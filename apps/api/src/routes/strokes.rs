//! Stroke oracle routes: health, cache stats, cache clear, single-character
//! and batch lookups.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::stroke_client::CacheStats;

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchResult {
    pub name: String,
    pub total_strokes: u32,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchResult>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CharStrokes {
    pub character: char,
    pub strokes: u32,
}

#[derive(Debug, Serialize)]
pub struct OracleHealth {
    pub healthy: bool,
}

/// GET /api/v1/strokes/health
pub async fn handle_health(State(state): State<AppState>) -> Json<OracleHealth> {
    Json(OracleHealth {
        healthy: state.strokes.health_check().await,
    })
}

/// GET /api/v1/strokes/cache
pub async fn handle_cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.strokes.cache_stats())
}

/// DELETE /api/v1/strokes/cache
pub async fn handle_clear_cache(State(state): State<AppState>) -> StatusCode {
    state.strokes.clear_cache();
    StatusCode::NO_CONTENT
}

/// GET /api/v1/strokes/char/:ch
pub async fn handle_char(
    State(state): State<AppState>,
    Path(ch): Path<String>,
) -> Result<Json<CharStrokes>, AppError> {
    let mut chars = ch.chars();
    let character = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(AppError::Validation(format!(
                "expected exactly one character, got '{ch}'"
            )))
        }
    };

    let strokes = state.strokes.strokes_of_char(character).await?;
    Ok(Json(CharStrokes { character, strokes }))
}

/// POST /api/v1/strokes/batch
pub async fn handle_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    if request.names.is_empty() {
        return Err(AppError::Validation("names cannot be empty".to_string()));
    }

    let results: Vec<BatchResult> = state
        .strokes
        .strokes_of_many(&request.names)
        .await?
        .into_iter()
        .map(|(name, total_strokes)| BatchResult {
            name,
            total_strokes,
        })
        .collect();

    Ok(Json(BatchResponse {
        count: results.len(),
        results,
    }))
}
