//! Middleware for the gateway API
//!
//! Provider guards short-circuit routes whose upstream credential is missing.

mod provider_guard;

pub use provider_guard::{require_content_model, require_image_jobs};
