//! Repository interfaces owned by the domain layer.

pub mod one_time_code;

pub use one_time_code::OneTimeCodeRepository;

#[cfg(test)]
pub use one_time_code::MockOneTimeCodeRepository;
