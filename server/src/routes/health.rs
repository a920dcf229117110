use axum::{routing::get, Router};

use crate::app_state::AppState;
use crate::handlers::{health_check, root};

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
}
