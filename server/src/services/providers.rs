//! Seams between handlers and the outside world.
//!
//! Each external provider sits behind one of these traits. Production wiring
//! uses the reqwest clients in this module tree; tests substitute fakes.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::GatewayError;
use crate::models::{CertificateRecord, CertificateRequest};

/// Image bytes sent alongside a prompt.
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Text/vision generation provider.
#[async_trait]
pub trait ContentModel: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<InlineImage>,
    ) -> Result<String, GatewayError>;
}

/// Provider-reported state of an image generation job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobSnapshot {
    pub status: Option<String>,
    pub progress: Option<Value>,
    pub uri: Option<String>,
    pub images: Option<Vec<String>>,
}

impl JobSnapshot {
    /// True when the provider flags the job as finished.
    pub fn reports_done(&self) -> bool {
        let done = self
            .status
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case("DONE"));
        let full = match &self.progress {
            Some(Value::String(progress)) => progress.trim() == "100",
            Some(Value::Number(progress)) => progress.as_f64() == Some(100.0),
            _ => false,
        };
        done || full
    }

    /// Direct URI first, then the first entry of the images array.
    pub fn image_locator(&self) -> Option<&str> {
        self.uri
            .as_deref()
            .filter(|uri| !uri.trim().is_empty())
            .or_else(|| {
                self.images
                    .as_ref()
                    .and_then(|images| images.first())
                    .map(String::as_str)
                    .filter(|uri| !uri.trim().is_empty())
            })
    }

    /// The finished image, only when completion and a locator coincide.
    pub fn completed_image(&self) -> Option<&str> {
        if self.reports_done() {
            self.image_locator()
        } else {
            None
        }
    }
}

/// Asynchronous image generation provider (submit, then poll).
#[async_trait]
pub trait ImageJobApi: Send + Sync {
    /// Submits one metered generation and returns the provider job id.
    async fn submit(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Fetches job status. `Ok(None)` is a transient non-2xx answer.
    async fn fetch(&self, job_id: &str) -> Result<Option<JobSnapshot>, GatewayError>;
}

/// Read-only ledger access.
#[async_trait]
pub trait BalanceReader: Send + Sync {
    /// Balance of `address` at the latest block, as the node's hex quantity.
    async fn balance_wei(&self, address: &str) -> Result<String, GatewayError>;
}

/// Issues carbon-credit certificates.
#[async_trait]
pub trait CertificateLedger: Send + Sync {
    async fn issue(&self, request: CertificateRequest) -> Result<CertificateRecord, GatewayError>;
}
