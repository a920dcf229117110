//! AI analysis and content generation handlers

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};

use crate::app_state::AppState;
use crate::error::{log_failure, GatewayError};
use crate::handlers::ApiJson;
use crate::models::{
    AnalysisResult, DescriptionRequest, DescriptionResponse, ImageUrlResponse,
    ProductImageRequest, StoryRequest, StoryResponse,
};
use crate::services::{prompts, ImagePoller, InlineImage};

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
/// Placeholder returned instead of a metered generation for inventory photos.
pub const INVENTORY_PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1532996122724-e3c354a0b15b?w=800&q=80";

/// Removes an optional Markdown code fence around a model reply.
pub fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

pub fn parse_analysis(reply: &str) -> Result<AnalysisResult, GatewayError> {
    serde_json::from_str(strip_code_fences(reply))
        .map_err(|err| GatewayError::MalformedProviderResponse(format!("analysis JSON: {err}")))
}

async fn read_image(multipart: &mut Multipart) -> Result<InlineImage, GatewayError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }
        let mime_type = field
            .content_type()
            .map(str::trim)
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME)
            .to_string();
        let data = field.bytes().await?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(GatewayError::PayloadTooLarge);
        }
        if data.is_empty() {
            break;
        }
        return Ok(InlineImage {
            mime_type,
            data: data.to_vec(),
        });
    }
    Err(GatewayError::BadRequest("No image file uploaded".to_string()))
}

async fn analyze(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<AnalysisResult, GatewayError> {
    let mut multipart =
        multipart.map_err(|_| GatewayError::BadRequest("No image file uploaded".to_string()))?;
    let image = read_image(&mut multipart).await?;
    let reply = state
        .content_model()?
        .generate(prompts::ANALYSIS_PROMPT, Some(image))
        .await?;
    parse_analysis(&reply)
}

/// Classify an uploaded waste photo
pub async fn analyze_waste(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, GatewayError> {
    analyze(&state, multipart)
        .await
        .map(Json)
        .map_err(log_failure("analyze-waste"))
}

async fn generate_text(state: &AppState, prompt: &str) -> Result<String, GatewayError> {
    let text = state.content_model()?.generate(prompt, None).await?;
    Ok(text.trim().to_string())
}

/// Write a marketplace description for an inventory batch
pub async fn generate_inventory_description(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DescriptionRequest>,
) -> Result<Json<DescriptionResponse>, GatewayError> {
    let prompt = prompts::inventory_description(&request);
    generate_text(&state, &prompt)
        .await
        .map(|description| Json(DescriptionResponse { description }))
        .map_err(log_failure("generate-inventory-description"))
}

/// Static inventory image; no provider is called.
pub async fn generate_inventory_image() -> Json<ImageUrlResponse> {
    Json(ImageUrlResponse {
        image_url: INVENTORY_PLACEHOLDER_IMAGE.to_string(),
    })
}

async fn product_image(state: &AppState, prompt: &str) -> Result<String, GatewayError> {
    ImagePoller::new(state.image_jobs()?, state.poll)
        .generate(prompt)
        .await
}

/// Generate a product photo through the image provider
pub async fn generate_product_image(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ProductImageRequest>,
) -> Result<Json<ImageUrlResponse>, GatewayError> {
    let prompt = prompts::product_image(&request);
    product_image(&state, &prompt)
        .await
        .map(|image_url| Json(ImageUrlResponse { image_url }))
        .map_err(log_failure("generate-product-image"))
}

/// Write a short story for an upcycled product
pub async fn generate_product_story(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<StoryRequest>,
) -> Result<Json<StoryResponse>, GatewayError> {
    let prompt = prompts::product_story(&request);
    generate_text(&state, &prompt)
        .await
        .map(|story| Json(StoryResponse { story }))
        .map_err(log_failure("generate-product-story"))
}
