use axum::Json;
use chrono::{DateTime, Utc};

use crate::handlers::ApiJson;
use crate::models::content::or_default;
use crate::models::invoice::INVOICE_DISCLAIMER;
use crate::models::{Invoice, InvoiceRequest};

pub fn build_invoice(request: InvoiceRequest, now: DateTime<Utc>) -> Invoice {
    let order_id = match or_default(&request.order_id, "") {
        "" => format!("INV-{}", now.timestamp_millis()),
        id => id.to_string(),
    };

    Invoice {
        order_id,
        date: now.format("%Y-%m-%d").to_string(),
        amount: request.amount.filter(|amount| amount.is_finite()).unwrap_or(0.0),
        company_name: or_default(&request.company_name, "—").to_string(),
        supplier: or_default(&request.supplier, "—").to_string(),
        items: request.items.unwrap_or_default(),
        disclaimer: INVOICE_DISCLAIMER,
    }
}

/// Build an invoice document from order details
pub async fn generate_invoice(ApiJson(request): ApiJson<InvoiceRequest>) -> Json<Invoice> {
    Json(build_invoice(request, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn empty_request_gets_generated_id_and_date() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 14, 30, 0).unwrap();
        let invoice = build_invoice(InvoiceRequest::default(), now);
        assert_eq!(invoice.order_id, format!("INV-{}", now.timestamp_millis()));
        assert_eq!(invoice.date, "2026-03-09");
        assert_eq!(invoice.amount, 0.0);
        assert!(invoice.items.is_empty());
        assert_eq!(invoice.company_name, "—");
        assert_eq!(invoice.disclaimer, INVOICE_DISCLAIMER);
    }

    #[test]
    fn provided_fields_are_kept() {
        let now = Utc::now();
        let invoice = build_invoice(
            InvoiceRequest {
                order_id: Some("ORD-77".into()),
                amount: Some(1250.5),
                items: Some(vec![json!({"name": "PET flakes", "kg": 100})]),
                company_name: Some("Acme Recycling".into()),
                supplier: Some("City MRF".into()),
            },
            now,
        );
        assert_eq!(invoice.order_id, "ORD-77");
        assert_eq!(invoice.amount, 1250.5);
        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.company_name, "Acme Recycling");
        assert_eq!(invoice.supplier, "City MRF");
    }
}
