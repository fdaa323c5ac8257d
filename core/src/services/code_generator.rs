//! Numeric one-time code generation

use rand::{rngs::OsRng, Rng};
use rb_shared::config::otp::{MAX_CODE_LENGTH, MIN_CODE_LENGTH};

use crate::errors::{DomainError, DomainResult};

/// Source of fresh one-time codes
pub trait CodeGenerator: Send + Sync {
    /// Produce a new code
    fn generate(&self) -> String;
}

/// Fixed-length, zero-padded decimal codes drawn from the OS CSPRNG
#[derive(Debug, Clone, Copy)]
pub struct NumericCodeGenerator {
    length: usize,
}

impl NumericCodeGenerator {
    /// Create a generator for codes of `length` digits
    ///
    /// # Errors
    ///
    /// `DomainError::Validation` when `length` is outside the supported range.
    pub fn new(length: usize) -> DomainResult<Self> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
            return Err(DomainError::Validation {
                message: format!(
                    "code length must be between {} and {}, got {}",
                    MIN_CODE_LENGTH, MAX_CODE_LENGTH, length
                ),
            });
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for NumericCodeGenerator {
    fn default() -> Self {
        Self { length: 6 }
    }
}

impl CodeGenerator for NumericCodeGenerator {
    fn generate(&self) -> String {
        // gen_range samples uniformly, no modulo bias
        let upper = 10u64.pow(self.length as u32);
        let value = OsRng.gen_range(0..upper);
        format!("{:0width$}", value, width = self.length)
    }
}
