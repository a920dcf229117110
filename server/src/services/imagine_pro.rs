//! ImaginePro image generation client (submit + status fetch)

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::warn;

use crate::error::GatewayError;
use crate::services::providers::{ImageJobApi, JobSnapshot};

pub const MAX_PROMPT_CHARS: usize = 2000;
pub const GENERATION_MODEL: &str = "flux-pro-ultra";

#[derive(Clone)]
pub struct ImagineProClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ImagineProClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

/// Truncates on a character boundary.
pub fn truncate_prompt(prompt: &str) -> &str {
    match prompt.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((index, _)) => &prompt[..index],
        None => prompt,
    }
}

fn submit_body(prompt: &str) -> Value {
    json!({
        "prompt": truncate_prompt(prompt),
        "num_images": 1,
        "aspect_ratio": "1:1",
        "model": GENERATION_MODEL,
        "output_format": "png",
    })
}

fn job_id(body: &Value) -> Option<String> {
    body.pointer("/messageId")
        .or_else(|| body.pointer("/message_id"))
        .or_else(|| body.pointer("/data/messageId"))
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty())
        .map(ToString::to_string)
}

#[async_trait]
impl ImageJobApi for ImagineProClient {
    async fn submit(&self, prompt: &str) -> Result<String, GatewayError> {
        let response = self
            .http
            .post(format!("{}/api/v1/nova/imagine", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&submit_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited(format!("429 from image provider: {text}")));
        }
        if !status.is_success() {
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|err| GatewayError::MalformedProviderResponse(err.to_string()))?;
        job_id(&body).ok_or(GatewayError::NoJobId)
    }

    async fn fetch(&self, job_id: &str) -> Result<Option<JobSnapshot>, GatewayError> {
        let response = self
            .http
            .get(format!("{}/api/v1/message/fetch/{}", self.base_url, job_id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(job_id, status = %response.status(), "image status fetch failed");
            return Ok(None);
        }

        response
            .json::<JobSnapshot>()
            .await
            .map(Some)
            .map_err(|err| GatewayError::MalformedProviderResponse(err.to_string()))
    }
}
