use std::sync::Arc;

use crate::fortune::service::FortuneService;
use crate::stroke_client::StrokeClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub fortune: Arc<FortuneService>,
    /// Same client (and cache) the fortune service uses; exposed for the admin routes.
    pub strokes: StrokeClient,
}
