use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;
use crate::error::GatewayError;

async fn guard(
    available: Result<(), GatewayError>,
    request: Request,
    next: Next,
) -> Response {
    match available {
        Ok(()) => next.run(request).await,
        Err(err) => {
            tracing::warn!(path = %request.uri().path(), error = %err, "provider not configured");
            err.into_response()
        }
    }
}

pub async fn require_content_model(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    guard(state.content_model().map(|_| ()), request, next).await
}

pub async fn require_image_jobs(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    guard(state.image_jobs().map(|_| ()), request, next).await
}
