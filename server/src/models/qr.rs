use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct QrRequest {
    #[serde(default)]
    pub payload: Value,
    pub size: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrResponse {
    pub qr_data_url: String,
    pub payload: String,
}
