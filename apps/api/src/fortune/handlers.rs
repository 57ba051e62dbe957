//! Axum route handlers for the Fortune API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::fortune::bazi::parse_birth_moment;
use crate::fortune::models::{BaZiReading, DailyReading, FortuneStats, NameReading};
use crate::models::fortune::FortuneHistoryRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BaZiRequest {
    pub user_id: Uuid,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    /// `HH:MM`
    pub birth_time: String,
    #[serde(default)]
    pub birth_place: String,
}

#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub user_id: Uuid,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub histories: Vec<FortuneHistoryRow>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ZodiacListResponse {
    pub zodiacs: &'static [&'static str],
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/fortune/bazi
pub async fn handle_bazi(
    State(state): State<AppState>,
    Json(request): Json<BaZiRequest>,
) -> Result<Json<BaZiReading>, AppError> {
    let birth = parse_birth_moment(&request.birth_date, &request.birth_time)?;

    let reading = state
        .fortune
        .calculate_bazi(request.user_id, birth, &request.birth_place)
        .await?;

    Ok(Json(reading))
}

/// POST /api/v1/fortune/name
pub async fn handle_name(
    State(state): State<AppState>,
    Json(request): Json<NameRequest>,
) -> Result<Json<NameReading>, AppError> {
    if request.full_name.trim().is_empty() {
        return Err(AppError::Validation("full_name cannot be empty".to_string()));
    }

    let reading = state
        .fortune
        .calculate_name_fortune(request.user_id, &request.full_name)
        .await?;

    Ok(Json(reading))
}

/// GET /api/v1/fortune/daily/:user_id/:zodiac
pub async fn handle_daily(
    State(state): State<AppState>,
    Path((user_id, zodiac)): Path<(Uuid, String)>,
) -> Result<Json<DailyReading>, AppError> {
    let reading = state.fortune.get_daily_fortune(user_id, &zodiac).await?;
    Ok(Json(reading))
}

/// GET /api/v1/fortune/history/:user_id
pub async fn handle_history(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, AppError> {
    let histories = state.fortune.get_history_for(user_id).await?;
    Ok(Json(HistoryResponse {
        total: histories.len(),
        histories,
    }))
}

/// GET /api/v1/fortune/stats/:user_id
pub async fn handle_stats(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<FortuneStats>, AppError> {
    Ok(Json(state.fortune.get_stats_for(user_id).await?))
}

/// GET /api/v1/fortune/zodiac-list
pub async fn handle_zodiac_list(State(state): State<AppState>) -> Json<ZodiacListResponse> {
    Json(ZodiacListResponse {
        zodiacs: state.fortune.zodiac_list(),
    })
}
