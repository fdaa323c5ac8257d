//! Verification service module
//!
//! Checks a submitted code against the latest active code for a user and
//! consumes it on a match.

mod service;
mod types;


pub use service::VerificationService;
pub use types::VerifiedCode;
