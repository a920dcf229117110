//! Wallet balance reads and demo certificate issuance

use axum::{
    extract::{Path, State},
    Json,
};

use crate::app_state::AppState;
use crate::error::{log_failure, GatewayError};
use crate::handlers::ApiJson;
use crate::models::ledger::{coerce_amount, is_wallet_address, CertificateBody};
use crate::models::{CertificateRecord, CertificateRequest, WalletBalance};
use crate::services::eth_rpc::{parse_wei, wei_to_eth};

pub const INVALID_ADDRESS_MESSAGE: &str = "Valid 0x wallet address required";

fn invalid_address() -> GatewayError {
    GatewayError::BadRequest(INVALID_ADDRESS_MESSAGE.to_string())
}

async fn read_balance(state: &AppState, address: String) -> Result<WalletBalance, GatewayError> {
    if !is_wallet_address(&address) {
        return Err(invalid_address());
    }
    let balance_wei = state.balances()?.balance_wei(&address).await?;
    let balance_eth = wei_to_eth(parse_wei(&balance_wei)?);
    Ok(WalletBalance {
        address,
        balance_wei,
        balance_eth,
        verified: true,
    })
}

/// Read a wallet's ETH balance at the latest block
pub async fn wallet_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<WalletBalance>, GatewayError> {
    read_balance(&state, address)
        .await
        .map(Json)
        .map_err(log_failure("wallet-balance"))
}

async fn issue(state: &AppState, body: CertificateBody) -> Result<CertificateRecord, GatewayError> {
    let wallet_address = body
        .wallet_address
        .map(|address| address.trim().to_string())
        .filter(|address| is_wallet_address(address))
        .ok_or_else(invalid_address)?;

    let request = CertificateRequest {
        wallet_address,
        co2_saved: coerce_amount(&body.co2_saved),
        waste_type: body.waste_type.filter(|label| !label.trim().is_empty()),
    };
    state.ledger.issue(request).await
}

/// Issue a demo carbon-credit certificate (no chain write)
pub async fn issue_certificate(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CertificateBody>,
) -> Result<Json<CertificateRecord>, GatewayError> {
    issue(&state, body)
        .await
        .map(Json)
        .map_err(log_failure("blockchain-certificate"))
}
