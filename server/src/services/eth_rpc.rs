//! Ethereum JSON-RPC balance reads

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::error::GatewayError;
use crate::services::providers::BalanceReader;

const WEI_PER_ETH: f64 = 1e18;

#[derive(Clone)]
pub struct EthRpcClient {
    http: Client,
    rpc_url: String,
}

impl EthRpcClient {
    pub fn new(http: Client, rpc_url: impl Into<String>) -> Self {
        Self {
            http,
            rpc_url: rpc_url.into(),
        }
    }

    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, GatewayError> {
        let response = self
            .http
            .post(&self.rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": method,
                "params": params,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| GatewayError::MalformedProviderResponse(err.to_string()))?;

        if let Some(error) = body.get("error").filter(|error| !error.is_null()) {
            let message = error
                .pointer("/message")
                .and_then(Value::as_str)
                .unwrap_or("unknown RPC error");
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                body: format!("{method} failed: {message}"),
            });
        }

        body.get("result")
            .cloned()
            .ok_or_else(|| GatewayError::MalformedProviderResponse(format!("{method} returned no result")))
    }
}

#[async_trait]
impl BalanceReader for EthRpcClient {
    async fn balance_wei(&self, address: &str) -> Result<String, GatewayError> {
        let result = self
            .rpc_call("eth_getBalance", json!([address, "latest"]))
            .await?;
        result.as_str().map(ToString::to_string).ok_or_else(|| {
            GatewayError::MalformedProviderResponse("eth_getBalance result is not a string".into())
        })
    }
}

/// Parses a JSON-RPC hex quantity (`0x...`) into wei.
pub fn parse_wei(hex_quantity: &str) -> Result<u128, GatewayError> {
    let digits = hex_quantity
        .strip_prefix("0x")
        .or_else(|| hex_quantity.strip_prefix("0X"))
        .ok_or_else(|| {
            GatewayError::MalformedProviderResponse(format!("balance {hex_quantity:?} is not hex"))
        })?;
    if digits.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(digits, 16).map_err(|err| {
        GatewayError::MalformedProviderResponse(format!("balance {hex_quantity:?}: {err}"))
    })
}

pub fn wei_to_eth(wei: u128) -> f64 {
    wei as f64 / WEI_PER_ETH
}
