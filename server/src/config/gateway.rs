use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_IMAGINEPRO_BASE_URL: &str = "https://api.imaginepro.ai";

pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";
pub const IMAGINEPRO_KEY_VAR: &str = "IMAGINEPRO_API_KEY";
pub const ETH_RPC_URL_VAR: &str = "ETH_RPC_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got {0:?}")]
    InvalidPort(String),
    #[error("HOST must be an IP address, got {0:?}")]
    InvalidHost(String),
}

/// Bounds of the image-generation poll loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollSettings {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            max_attempts: 24,
            interval: Duration::from_millis(2_500),
        }
    }
}

/// Gateway configuration resolved from the environment at startup.
///
/// Provider credentials are optional: a missing key disables the routes that
/// need it (they answer 503) without stopping the process.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub host: IpAddr,
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub imaginepro_api_key: Option<String>,
    pub imaginepro_base_url: String,
    pub eth_rpc_url: Option<String>,
    pub poll: PollSettings,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            imaginepro_api_key: None,
            imaginepro_base_url: DEFAULT_IMAGINEPRO_BASE_URL.to_string(),
            eth_rpc_url: None,
            poll: PollSettings::default(),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .ok()
                .filter(|port| *port != 0)
                .ok_or(ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let host = match var("HOST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidHost(raw))?,
            None => defaults.host,
        };

        Ok(Self {
            host,
            port,
            gemini_api_key: var(GEMINI_KEY_VAR).or_else(|| var("GOOGLE_API_KEY")),
            gemini_model: var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            imaginepro_api_key: var(IMAGINEPRO_KEY_VAR),
            imaginepro_base_url: var("IMAGINEPRO_BASE_URL")
                .unwrap_or(defaults.imaginepro_base_url),
            eth_rpc_url: var(ETH_RPC_URL_VAR),
            poll: defaults.poll,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
