//! Periodic removal of expired one-time codes
//!
//! Expiry is enforced logically by the store queries; this service only
//! keeps the table from growing without bound.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::DomainResult;
use crate::repositories::OneTimeCodeRepository;

/// Configuration for the cleanup service
#[derive(Debug, Clone)]
pub struct CodeCleanupConfig {
    /// How often to run cleanup (in seconds); 0 disables the task
    pub interval_seconds: u64,
    /// How long an expired code is kept before deletion
    pub grace_period: Duration,
}

impl Default for CodeCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            grace_period: Duration::hours(1),
        }
    }
}

/// Service deleting codes that expired more than a grace period ago
pub struct CodeCleanupService<R>
where
    R: OneTimeCodeRepository + ?Sized + 'static,
{
    repository: Arc<R>,
    config: CodeCleanupConfig,
}

impl<R> CodeCleanupService<R>
where
    R: OneTimeCodeRepository + ?Sized + 'static,
{
    /// Create a new cleanup service
    pub fn new(repository: Arc<R>, config: CodeCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle, returning the number of deleted codes
    pub async fn run_cleanup(&self) -> DomainResult<u64> {
        let cutoff = Utc::now() - self.config.grace_period;
        let deleted = self.repository.purge_expired(cutoff).await?;
        if deleted > 0 {
            info!(deleted = deleted, event = "otp_purged", "Deleted expired one-time codes");
        }
        Ok(deleted)
    }

    /// Start the cleanup service as a background task
    pub fn start_background_task(self: Arc<Self>) {
        if self.config.interval_seconds == 0 {
            warn!("One-time code cleanup is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "One-time code cleanup started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!("One-time code cleanup cycle failed: {}", e);
                }
            }
        });
    }
}
