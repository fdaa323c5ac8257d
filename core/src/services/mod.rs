//! Business services containing domain logic and use cases.

pub mod cleanup;
pub mod code_generator;
pub mod delivery;
pub mod issuance;
pub mod verification;

pub use cleanup::{CodeCleanupConfig, CodeCleanupService};
pub use code_generator::{CodeGenerator, NumericCodeGenerator};
pub use delivery::{DeliveryGateway, ProviderResponse};
pub use issuance::{DeliveryReceipt, IssuanceConfig, IssuanceService, IssuedCode};
pub use verification::{VerificationService, VerifiedCode};
