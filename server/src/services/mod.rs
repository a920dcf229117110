//! Provider clients and the local generators behind the handlers

pub mod eth_rpc;
pub mod gemini;
pub mod image_poller;
pub mod imagine_pro;
pub mod mock_ledger;
pub mod pdf_report;
pub mod prompts;
pub mod providers;
pub mod qr_code;

pub use eth_rpc::EthRpcClient;
pub use gemini::GeminiClient;
pub use image_poller::{ImagePoller, PollState};
pub use imagine_pro::ImagineProClient;
pub use mock_ledger::MockLedger;
pub use providers::{
    BalanceReader, CertificateLedger, ContentModel, ImageJobApi, InlineImage, JobSnapshot,
};
