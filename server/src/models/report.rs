use serde::Deserialize;

use crate::models::lenient;

pub const REPORT_CONTENT_DISPOSITION: &str =
    "attachment; filename=\"waste-segregation-report.pdf\"";
pub const REPORT_TITLE: &str = "Waste Segregation Report";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default, deserialize_with = "lenient::text")]
    pub date_from: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date_to: Option<String>,
}
