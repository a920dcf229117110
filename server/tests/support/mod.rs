#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use greenbin_gateway::config::PollSettings;
use greenbin_gateway::services::{
    BalanceReader, ContentModel, ImageJobApi, InlineImage, JobSnapshot, MockLedger,
};
use greenbin_gateway::{app, AppState, GatewayError};

pub const BODY_LIMIT: usize = 16 * 1024 * 1024;
pub const BOUNDARY: &str = "greenbin-test-boundary";

pub enum Reply {
    Text(String),
    RateLimited,
    Provider(u16, String),
}

/// Text model returning a fixed reply and recording what it was sent.
pub struct FakeModel {
    reply: Reply,
    pub prompts: Mutex<Vec<String>>,
    pub images: Mutex<Vec<InlineImage>>,
}

impl FakeModel {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
            images: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(Reply::Text(text.to_string()))
    }

    pub fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl ContentModel for FakeModel {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<InlineImage>,
    ) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(image) = image {
            self.images.lock().unwrap().push(image);
        }
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::RateLimited => Err(GatewayError::RateLimited("429 Too Many Requests".into())),
            Reply::Provider(status, body) => Err(GatewayError::Provider {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

/// Image provider that replays a scripted sequence of status snapshots.
pub struct FakeJobs {
    replies: Mutex<VecDeque<Option<JobSnapshot>>>,
    pub submits: AtomicU32,
    pub fetches: AtomicU32,
}

impl FakeJobs {
    pub fn new(replies: Vec<Option<JobSnapshot>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            submits: AtomicU32::new(0),
            fetches: AtomicU32::new(0),
        })
    }

    pub fn finishing_with(url: &str) -> Arc<Self> {
        Self::new(vec![
            Some(snapshot("PROCESSING", None)),
            None,
            Some(snapshot("DONE", Some(url))),
        ])
    }

    pub fn never_finishing() -> Arc<Self> {
        Self::new(Vec::new())
    }
}

pub fn snapshot(status: &str, uri: Option<&str>) -> JobSnapshot {
    JobSnapshot {
        status: Some(status.to_string()),
        uri: uri.map(ToString::to_string),
        ..Default::default()
    }
}

#[async_trait]
impl ImageJobApi for FakeJobs {
    async fn submit(&self, _prompt: &str) -> Result<String, GatewayError> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        Ok("job-42".to_string())
    }

    async fn fetch(&self, _job_id: &str) -> Result<Option<JobSnapshot>, GatewayError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Some(snapshot("PROCESSING", None))))
    }
}

pub struct FakeBalances {
    hex: String,
    pub calls: AtomicU32,
}

impl FakeBalances {
    pub fn new(hex: &str) -> Arc<Self> {
        Arc::new(Self {
            hex: hex.to_string(),
            calls: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl BalanceReader for FakeBalances {
    async fn balance_wei(&self, _address: &str) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.hex.clone())
    }
}

pub fn fast_poll() -> PollSettings {
    PollSettings {
        max_attempts: 24,
        interval: Duration::ZERO,
    }
}

/// State with no providers configured.
pub fn bare_state() -> AppState {
    AppState::new(Arc::new(MockLedger)).with_poll(fast_poll())
}

pub fn router(state: AppState) -> Router {
    app(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("parse json")
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router call");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub fn post_raw(uri: &str, content_type: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .expect("build request")
}

/// Multipart body with one file field; `mime` of `None` omits the part's content type.
pub fn multipart_upload(field: &str, mime: Option<&str>, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"bin.jpg\"\r\n")
            .as_bytes(),
    );
    if let Some(mime) = mime {
        body.extend_from_slice(format!("Content-Type: {mime}\r\n").as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    post_raw(
        "/api/ai/analyze-waste",
        &format!("multipart/form-data; boundary={BOUNDARY}"),
        body,
    )
}
