mod repository;

pub use repository::OneTimeCodeRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockOneTimeCodeRepository;
