//! In-memory code store
//!
//! Selected with `CODE_STORE=memory`. Codes are grouped per user behind a
//! single mutex, so invalidating the previous code and inserting the new one
//! happen under the same lock. Nothing survives a restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use rb_core::domain::entities::one_time_code::{NewOneTimeCode, OneTimeCode};
use rb_core::errors::{DomainError, DomainResult};
use rb_core::repositories::OneTimeCodeRepository;

/// In-memory implementation of OneTimeCodeRepository
#[derive(Default)]
pub struct InMemoryOneTimeCodeRepository {
    codes: Mutex<HashMap<String, Vec<OneTimeCode>>>,
}

impl InMemoryOneTimeCodeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, used or not
    pub fn len(&self) -> DomainResult<usize> {
        Ok(self.lock()?.values().map(Vec::len).sum())
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, HashMap<String, Vec<OneTimeCode>>>> {
        self.codes.lock().map_err(|_| DomainError::Internal {
            message: "In-memory code store lock poisoned".to_string(),
        })
    }
}

#[async_trait]
impl OneTimeCodeRepository for InMemoryOneTimeCodeRepository {
    async fn create(&self, draft: NewOneTimeCode) -> DomainResult<OneTimeCode> {
        let record = draft.into_record();
        let mut codes = self.lock()?;
        let user_codes = codes.entry(record.user_id.clone()).or_default();

        for existing in user_codes.iter_mut().filter(|c| c.is_active_at(record.created_at)) {
            existing.is_used = true;
        }
        user_codes.push(record.clone());

        Ok(record)
    }

    async fn find_active(&self, user_id: &str, code: &str) -> DomainResult<Option<OneTimeCode>> {
        let now = Utc::now();
        let codes = self.lock()?;

        Ok(codes.get(user_id).and_then(|user_codes| {
            user_codes
                .iter()
                .filter(|c| c.code == code && c.is_active_at(now))
                .max_by_key(|c| c.created_at)
                .cloned()
        }))
    }

    async fn find_latest_active(&self, user_id: &str) -> DomainResult<Option<OneTimeCode>> {
        let now = Utc::now();
        let codes = self.lock()?;

        Ok(codes.get(user_id).and_then(|user_codes| {
            user_codes
                .iter()
                .filter(|c| c.is_active_at(now))
                .max_by_key(|c| c.created_at)
                .cloned()
        }))
    }

    async fn mark_used(&self, id: Uuid) -> DomainResult<bool> {
        let mut codes = self.lock()?;

        let record = codes
            .values_mut()
            .flat_map(|user_codes| user_codes.iter_mut())
            .find(|c| c.id == id);

        Ok(match record {
            Some(record) if !record.is_used => {
                record.is_used = true;
                true
            }
            _ => false,
        })
    }

    async fn purge_expired(&self, before: DateTime<Utc>) -> DomainResult<u64> {
        let mut codes = self.lock()?;
        let mut purged = 0u64;

        codes.retain(|_, user_codes| {
            let initial = user_codes.len();
            user_codes.retain(|c| c.expires_at >= before);
            purged += (initial - user_codes.len()) as u64;
            !user_codes.is_empty()
        });

        Ok(purged)
    }
}
