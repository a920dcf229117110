use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::lenient;

pub const INVOICE_DISCLAIMER: &str =
    "This invoice was generated automatically by Green Bin and is valid without a signature.";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    #[serde(default, deserialize_with = "lenient::text")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub items: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub supplier: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub order_id: String,
    pub date: String,
    pub amount: f64,
    pub items: Vec<Value>,
    pub company_name: String,
    pub supplier: String,
    pub disclaimer: &'static str,
}
