use std::sync::Arc;

use sqlx::PgPool;

use crate::matching::MatchScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable match scorer. Production: `LlmMatchScorer`.
    pub scorer: Arc<dyn MatchScorer>,
}
