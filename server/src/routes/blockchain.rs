use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;
use crate::handlers::{issue_certificate, wallet_balance};

// The wallet route validates the address before checking RPC configuration,
// so it carries no provider guard.
pub fn blockchain_routes() -> Router<AppState> {
    Router::new()
        .route("/api/blockchain/wallet/:address", get(wallet_balance))
        .route("/api/blockchain/certificate", post(issue_certificate))
}
