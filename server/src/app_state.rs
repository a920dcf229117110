//! Application state shared across handlers

use std::sync::Arc;

use reqwest::Client;

use crate::config::gateway::{ETH_RPC_URL_VAR, GEMINI_KEY_VAR, IMAGINEPRO_KEY_VAR};
use crate::config::{GatewayConfig, PollSettings};
use crate::error::GatewayError;
use crate::services::{
    BalanceReader, CertificateLedger, ContentModel, EthRpcClient, GeminiClient, ImageJobApi,
    ImagineProClient, MockLedger,
};

/// Provider clients injected into every handler.
///
/// A `None` provider means its credential was not configured; the routes
/// that need it answer 503.
#[derive(Clone)]
pub struct AppState {
    pub content_model: Option<Arc<dyn ContentModel>>,
    pub image_jobs: Option<Arc<dyn ImageJobApi>>,
    pub balances: Option<Arc<dyn BalanceReader>>,
    pub ledger: Arc<dyn CertificateLedger>,
    pub poll: PollSettings,
}

impl AppState {
    pub fn new(ledger: Arc<dyn CertificateLedger>) -> Self {
        Self {
            content_model: None,
            image_jobs: None,
            balances: None,
            ledger,
            poll: PollSettings::default(),
        }
    }

    /// Builds the production clients described by `config`.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let http = Client::new();

        let content_model = config.gemini_api_key.as_ref().map(|key| {
            Arc::new(GeminiClient::new(
                http.clone(),
                &config.gemini_base_url,
                &config.gemini_model,
                key,
            )) as Arc<dyn ContentModel>
        });
        let image_jobs = config.imaginepro_api_key.as_ref().map(|key| {
            Arc::new(ImagineProClient::new(
                http.clone(),
                &config.imaginepro_base_url,
                key,
            )) as Arc<dyn ImageJobApi>
        });
        let balances = config.eth_rpc_url.as_ref().map(|url| {
            Arc::new(EthRpcClient::new(http.clone(), url)) as Arc<dyn BalanceReader>
        });

        Self {
            content_model,
            image_jobs,
            balances,
            ledger: Arc::new(MockLedger),
            poll: config.poll,
        }
    }

    pub fn with_content_model(mut self, model: Arc<dyn ContentModel>) -> Self {
        self.content_model = Some(model);
        self
    }

    pub fn with_image_jobs(mut self, jobs: Arc<dyn ImageJobApi>) -> Self {
        self.image_jobs = Some(jobs);
        self
    }

    pub fn with_balances(mut self, balances: Arc<dyn BalanceReader>) -> Self {
        self.balances = Some(balances);
        self
    }

    pub fn with_poll(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    pub fn content_model(&self) -> Result<&dyn ContentModel, GatewayError> {
        self.content_model
            .as_deref()
            .ok_or(GatewayError::NotConfigured(GEMINI_KEY_VAR))
    }

    pub fn image_jobs(&self) -> Result<&dyn ImageJobApi, GatewayError> {
        self.image_jobs
            .as_deref()
            .ok_or(GatewayError::NotConfigured(IMAGINEPRO_KEY_VAR))
    }

    pub fn balances(&self) -> Result<&dyn BalanceReader, GatewayError> {
        self.balances
            .as_deref()
            .ok_or(GatewayError::NotConfigured(ETH_RPC_URL_VAR))
    }
}
