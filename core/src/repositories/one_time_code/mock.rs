//! Mock implementation of OneTimeCodeRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::one_time_code::{NewOneTimeCode, OneTimeCode};
use crate::errors::{DomainError, DomainResult};

use super::repository::OneTimeCodeRepository;

/// Mock code store for testing
#[derive(Default)]
pub struct MockOneTimeCodeRepository {
    codes: Arc<RwLock<Vec<OneTimeCode>>>,
    should_fail: AtomicBool,
}

impl MockOneTimeCodeRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with an internal error
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Insert a record as-is, bypassing invalidation
    pub async fn insert_raw(&self, record: OneTimeCode) {
        self.codes.write().await.push(record);
    }

    /// Snapshot of every stored record
    pub async fn all(&self) -> Vec<OneTimeCode> {
        self.codes.read().await.clone()
    }

    fn check(&self) -> DomainResult<()> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Mock store failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl OneTimeCodeRepository for MockOneTimeCodeRepository {
    async fn create(&self, draft: NewOneTimeCode) -> DomainResult<OneTimeCode> {
        self.check()?;
        let now = Utc::now();
        let mut codes = self.codes.write().await;
        for existing in codes.iter_mut() {
            if existing.user_id == draft.user_id() && existing.is_active_at(now) {
                existing.is_used = true;
            }
        }
        let record = draft.into_record();
        codes.push(record.clone());
        Ok(record)
    }

    async fn find_active(&self, user_id: &str, code: &str) -> DomainResult<Option<OneTimeCode>> {
        self.check()?;
        let now = Utc::now();
        let codes = self.codes.read().await;
        Ok(codes
            .iter()
            .find(|c| c.user_id == user_id && c.code == code && c.is_active_at(now))
            .cloned())
    }

    async fn find_latest_active(&self, user_id: &str) -> DomainResult<Option<OneTimeCode>> {
        self.check()?;
        let now = Utc::now();
        let codes = self.codes.read().await;
        Ok(codes
            .iter()
            .filter(|c| c.user_id == user_id && c.is_active_at(now))
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn mark_used(&self, id: Uuid) -> DomainResult<bool> {
        self.check()?;
        let mut codes = self.codes.write().await;
        match codes.iter_mut().find(|c| c.id == id && !c.is_used) {
            Some(record) => {
                record.is_used = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn purge_expired(&self, before: DateTime<Utc>) -> DomainResult<u64> {
        self.check()?;
        let mut codes = self.codes.write().await;
        let before_len = codes.len();
        codes.retain(|c| c.expires_at >= before);
        Ok((before_len - codes.len()) as u64)
    }
}
