//! API handlers for the integration gateway

pub mod ai;
pub mod blockchain;
pub mod health;
pub mod invoice;
pub mod qr;
pub mod reports;

pub use ai::{
    analyze_waste, generate_inventory_description, generate_inventory_image,
    generate_product_image, generate_product_story,
};
pub use blockchain::{issue_certificate, wallet_balance};
pub use health::{health_check, not_found, root};
pub use invoice::generate_invoice;
pub use qr::generate_qr;
pub use reports::waste_report_pdf;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde::de::DeserializeOwned;

use crate::error::GatewayError;

/// JSON body extractor with `{error}` rejections.
///
/// An empty body deserializes as `T::default()`, since every request field
/// on this API is optional. A non-empty body must be sent as JSON.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declared_json = is_json_content(request.headers());
        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(|rejection| GatewayError::BadRequest(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiJson(T::default()));
        }
        if !declared_json {
            return Err(GatewayError::BadRequest(
                "Expected request with `Content-Type: application/json`".to_string(),
            ));
        }

        serde_json::from_slice(&bytes)
            .map(ApiJson)
            .map_err(|err| GatewayError::BadRequest(format!("Invalid JSON body: {err}")))
    }
}

fn is_json_content(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
