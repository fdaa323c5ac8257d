//! Process-local storage backends

pub mod one_time_code_store;


pub use one_time_code_store::InMemoryOneTimeCodeRepository;
