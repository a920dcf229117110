use axum::{extract::DefaultBodyLimit, middleware, routing::post, Router};

use crate::app_state::AppState;
use crate::handlers::ai::MAX_UPLOAD_BYTES;
use crate::handlers::{
    analyze_waste, generate_inventory_description, generate_inventory_image,
    generate_product_image, generate_product_story,
};
use crate::middleware::{require_content_model, require_image_jobs};

/// Room for multipart boundaries and part headers around a maximal upload.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn ai_routes(state: &AppState) -> Router<AppState> {
    let text_model = Router::new()
        .route(
            "/api/ai/analyze-waste",
            post(analyze_waste).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD)),
        )
        .route(
            "/api/ai/generate-inventory-description",
            post(generate_inventory_description),
        )
        .route("/api/ai/generate-product-story", post(generate_product_story))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_content_model,
        ));

    let image_model = Router::new()
        .route("/api/ai/generate-product-image", post(generate_product_image))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_image_jobs,
        ));

    Router::new()
        .route(
            "/api/ai/generate-inventory-image",
            post(generate_inventory_image),
        )
        .merge(text_model)
        .merge(image_model)
}
