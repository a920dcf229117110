//! Gateway error taxonomy and its HTTP mapping

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const RATE_LIMIT_MESSAGE: &str =
    "AI rate limit reached. Please try again in a minute (quota status: https://aistudio.google.com/app/apikey).";
pub const TIMED_OUT_MESSAGE: &str = "Image generation timed out. Please try again.";
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0} is not configured on the server")]
    NotConfigured(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("Uploaded file exceeds the 10 MiB limit")]
    PayloadTooLarge,

    #[error("{0}")]
    RateLimited(String),

    #[error("Provider error {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Image provider did not return a job id")]
    NoJobId,

    #[error("{}", TIMED_OUT_MESSAGE)]
    TimedOut,

    #[error("Provider returned a malformed response: {0}")]
    MalformedProviderResponse(String),

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Internal(String),
}

/// Outcome of classifying a provider-facing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    RateLimited,
    Generic,
}

/// Matches the upstream's untyped rate-limit signals.
pub fn is_rate_limit_message(message: &str) -> bool {
    let lowered = message.to_ascii_lowercase();
    lowered.contains("429") || lowered.contains("quota") || lowered.contains("rate limit")
}

pub fn classify_failure(error: &GatewayError) -> FailureClass {
    match error {
        GatewayError::RateLimited(_) => FailureClass::RateLimited,
        GatewayError::Provider { status: 429, .. } => FailureClass::RateLimited,
        other if is_rate_limit_message(&other.to_string()) => FailureClass::RateLimited,
        _ => FailureClass::Generic,
    }
}

impl GatewayError {
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            GatewayError::NotConfigured(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            GatewayError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            GatewayError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            other => match classify_failure(other) {
                FailureClass::RateLimited => {
                    (StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE.to_string())
                }
                FailureClass::Generic => {
                    let message = other.to_string();
                    let message = if message.trim().is_empty() {
                        FALLBACK_MESSAGE.to_string()
                    } else {
                        message
                    };
                    (StatusCode::INTERNAL_SERVER_ERROR, message)
                }
            },
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<MultipartError> for GatewayError {
    fn from(error: MultipartError) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            GatewayError::PayloadTooLarge
        } else {
            GatewayError::BadRequest(format!("Invalid multipart body: {}", error.body_text()))
        }
    }
}

/// Logs a failed request under its handler name before it is rendered.
pub fn log_failure(handler: &'static str) -> impl Fn(GatewayError) -> GatewayError {
    move |error| {
        tracing::error!(handler, error = %error, "request failed");
        error
    }
}
