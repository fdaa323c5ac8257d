//! Issuance service module
//!
//! Two flows are provided:
//! - `issue` forwards a caller-supplied code to the delivery gateway
//! - `issue_generated` generates, persists and delivers a server-side code

mod config;
mod service;
mod types;


pub use config::IssuanceConfig;
pub use service::IssuanceService;
pub use types::{DeliveryReceipt, IssuedCode};
