//! Green Bin Integration Gateway
//!
//! HTTP gateway between the marketplace frontend and its third-party
//! providers: AI analysis and content generation, image generation, QR codes,
//! PDF reports, and Ethereum balance reads.

pub mod app_state;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::{
    http::{header, Method},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use app_state::AppState;
pub use config::GatewayConfig;
pub use error::GatewayError;

/// Builds the full gateway router over `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::ai_routes(&state))
        .merge(routes::document_routes(&state))
        .merge(routes::blockchain_routes())
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer()),
        )
        .with_state(state)
}

/// Any browser origin may call the gateway; the request origin is echoed back.
pub fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([header::CONTENT_DISPOSITION])
        .allow_credentials(false)
}
