//! Demo certificate issuance. Nothing is written to any chain.

use async_trait::async_trait;
use chrono::Utc;
use rand::RngCore;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::GatewayError;
use crate::models::{CertificateRecord, CertificateRequest};
use crate::services::providers::CertificateLedger;

pub const MOCK_CERTIFICATE_MESSAGE: &str = "Demo certificate: generated locally and NOT recorded on any blockchain. The txHash is random and cannot be verified on-chain.";

#[derive(Debug, Default, Clone, Copy)]
pub struct MockLedger;

/// Hashed certificate content, serialized in field order starting at the wallet.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CertificatePayload<'a> {
    wallet_address: &'a str,
    co2_saved: f64,
    waste_type: Option<&'a str>,
    issued_at: String,
    certificate_id: &'a str,
}

/// `0x` plus the first 64 hex characters of the hex-encoded payload bytes.
pub fn payload_hash(payload: &str) -> String {
    let mut encoded = hex::encode(payload.as_bytes());
    encoded.truncate(64);
    format!("0x{encoded:0<64}")
}

fn random_tx_hash() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}

#[async_trait]
impl CertificateLedger for MockLedger {
    async fn issue(&self, request: CertificateRequest) -> Result<CertificateRecord, GatewayError> {
        let issued_at = Utc::now();
        let certificate_id = format!("GB-CC-{}", issued_at.timestamp_millis());

        let payload = serde_json::to_string(&CertificatePayload {
            wallet_address: &request.wallet_address,
            co2_saved: request.co2_saved,
            waste_type: request.waste_type.as_deref(),
            issued_at: issued_at.to_rfc3339(),
            certificate_id: &certificate_id,
        })
        .map_err(|err| GatewayError::Internal(format!("certificate payload: {err}")))?;

        warn!("Using simulated certificate issuance - no ledger write is performed");
        info!(
            certificate_id = %certificate_id,
            wallet = %request.wallet_address,
            co2_saved = request.co2_saved,
            "issued demo certificate"
        );

        Ok(CertificateRecord {
            certificate_id,
            tx_hash: random_tx_hash(),
            payload_hash: payload_hash(&payload),
            message: MOCK_CERTIFICATE_MESSAGE.to_string(),
        })
    }
}
