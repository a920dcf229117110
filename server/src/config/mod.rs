//! Runtime configuration for the gateway

pub mod gateway;

pub use gateway::{ConfigError, GatewayConfig, PollSettings};
