use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;
use crate::error::{log_failure, GatewayError};
use crate::handlers::ApiJson;
use crate::models::report::{REPORT_CONTENT_DISPOSITION, REPORT_TITLE};
use crate::models::ReportRequest;
use crate::services::{pdf_report, prompts};

/// Report text as laid out in the PDF: title, period, blank line, body.
pub fn report_document(request: &ReportRequest, body: &str) -> String {
    let (from, to) = prompts::report_period(request);
    format!("{REPORT_TITLE}\nPeriod: {from} to {to}\n\n{}", body.trim())
}

async fn build_report(state: &AppState, request: ReportRequest) -> Result<Vec<u8>, GatewayError> {
    let body = state
        .content_model()?
        .generate(&prompts::waste_report(&request), None)
        .await?;
    let pages = pdf_report::layout(&report_document(&request, &body));
    pdf_report::render_pdf(&pages)
}

/// Generate the waste segregation report as a PDF download
pub async fn waste_report_pdf(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ReportRequest>,
) -> Result<Response, GatewayError> {
    let pdf = build_report(&state, request)
        .await
        .map_err(log_failure("waste-report-pdf"))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, REPORT_CONTENT_DISPOSITION),
        ],
        pdf,
    )
        .into_response())
}
