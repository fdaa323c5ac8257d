//! MySQL repository implementations

pub mod one_time_code_repository_impl;

pub use one_time_code_repository_impl::MySqlOneTimeCodeRepository;
