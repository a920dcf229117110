//! Request and response payloads for the gateway

pub mod analysis;
pub mod content;
pub mod invoice;
pub mod ledger;
pub mod lenient;
pub mod qr;
pub mod report;

pub use analysis::{AnalysisResult, Grade, MaterialCategory};
pub use content::{
    DescriptionRequest, DescriptionResponse, ImageUrlResponse, ProductImageRequest,
    StoryRequest, StoryResponse,
};
pub use invoice::{Invoice, InvoiceRequest};
pub use ledger::{CertificateRecord, CertificateRequest, WalletBalance};
pub use qr::{QrRequest, QrResponse};
pub use report::ReportRequest;

use serde::Serialize;

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub ok: bool,
    pub gemini: bool,
    #[serde(rename = "imaginePro")]
    pub imagine_pro: bool,
    pub message: String,
}
