//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and migrations
//! - The `one_time_codes` store

pub mod connection;
pub mod mysql;


pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::MySqlOneTimeCodeRepository;
