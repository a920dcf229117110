//! Route definitions for the gateway API

mod ai;
mod blockchain;
mod documents;
mod health;

pub use ai::ai_routes;
pub use blockchain::blockchain_routes;
pub use documents::document_routes;
pub use health::health_routes;
