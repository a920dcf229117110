use axum::Json;

use crate::error::{log_failure, GatewayError};
use crate::handlers::ApiJson;
use crate::models::{QrRequest, QrResponse};
use crate::services::qr_code;

fn render(request: QrRequest) -> Result<QrResponse, GatewayError> {
    let payload = qr_code::payload_text(&request.payload)?;
    let size = qr_code::effective_size(request.size);
    let png = qr_code::render_png(&payload, size)?;
    Ok(QrResponse {
        qr_data_url: qr_code::data_url(&png),
        payload,
    })
}

/// Encode a payload as a QR code PNG data URI
pub async fn generate_qr(
    ApiJson(request): ApiJson<QrRequest>,
) -> Result<Json<QrResponse>, GatewayError> {
    render(request).map(Json).map_err(log_failure("qr-generate"))
}
