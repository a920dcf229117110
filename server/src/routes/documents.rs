use axum::{middleware, routing::post, Router};

use crate::app_state::AppState;
use crate::handlers::{generate_invoice, generate_qr, waste_report_pdf};
use crate::middleware::require_content_model;

pub fn document_routes(state: &AppState) -> Router<AppState> {
    let reports = Router::new()
        .route("/api/reports/waste-report-pdf", post(waste_report_pdf))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_content_model,
        ));

    Router::new()
        .route("/api/qr/generate", post(generate_qr))
        .route("/api/invoice/generate", post(generate_invoice))
        .merge(reports)
}
