pub mod otp;

pub use otp::{IssueCodeRequest, SendCodeRequest, VerifiedCodeData, VerifyCodeRequest};
