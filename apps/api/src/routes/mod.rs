pub mod health;
pub mod strokes;

use axum::{
    routing::{get, post},
    Router,
};

use crate::fortune::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Fortune API
        .route("/api/v1/fortune/bazi", post(handlers::handle_bazi))
        .route("/api/v1/fortune/name", post(handlers::handle_name))
        .route(
            "/api/v1/fortune/daily/:user_id/:zodiac",
            get(handlers::handle_daily),
        )
        .route(
            "/api/v1/fortune/history/:user_id",
            get(handlers::handle_history),
        )
        .route("/api/v1/fortune/stats/:user_id", get(handlers::handle_stats))
        .route(
            "/api/v1/fortune/zodiac-list",
            get(handlers::handle_zodiac_list),
        )
        // Stroke oracle admin
        .route("/api/v1/strokes/health", get(strokes::handle_health))
        .route(
            "/api/v1/strokes/cache",
            get(strokes::handle_cache_stats).delete(strokes::handle_clear_cache),
        )
        .route("/api/v1/strokes/char/:ch", get(strokes::handle_char))
        .route("/api/v1/strokes/batch", post(strokes::handle_batch))
        .with_state(state)
}
