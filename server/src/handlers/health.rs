use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::app_state::AppState;
use crate::models::HealthStatus;

pub async fn root() -> &'static str {
    "Green Bin Integration Gateway"
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let gemini = state.content_model.is_some();
    let imagine_pro = state.image_jobs.is_some();
    let message = match (gemini, imagine_pro) {
        (true, true) => "Gateway running; all AI providers configured",
        (false, false) => "Gateway running; no AI provider configured",
        _ => "Gateway running; some AI providers are not configured",
    };

    Json(HealthStatus {
        ok: true,
        gemini,
        imagine_pro,
        message: message.to_string(),
    })
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
