use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::lenient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub address: String,
    pub balance_wei: String,
    pub balance_eth: f64,
    pub verified: bool,
}

/// Raw certificate request body; `co2Saved` is coerced, not validated.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateBody {
    #[serde(default, deserialize_with = "lenient::text")]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub co2_saved: Value,
    #[serde(default, deserialize_with = "lenient::text")]
    pub waste_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CertificateRequest {
    pub wallet_address: String,
    pub co2_saved: f64,
    pub waste_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    pub certificate_id: String,
    pub tx_hash: String,
    pub payload_hash: String,
    pub message: String,
}

/// Coerces a loosely typed amount: numbers and numeric strings pass, anything else is 0.
pub fn coerce_amount(value: &Value) -> f64 {
    let amount = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if amount.is_finite() {
        amount
    } else {
        0.0
    }
}

/// Ledger addresses accepted by the wallet and certificate routes.
pub fn is_wallet_address(address: &str) -> bool {
    address.starts_with("0x")
}
