//! MySQL implementation of the OneTimeCodeRepository trait.
//!
//! Codes live in the `one_time_codes` table. Creating a code and retiring the
//! user's previous active codes happen in one transaction, and `mark_used`
//! is a conditional update so only one caller can consume a code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use rb_core::domain::entities::one_time_code::{NewOneTimeCode, OneTimeCode};
use rb_core::errors::{DomainError, DomainResult};
use rb_core::repositories::OneTimeCodeRepository;

const SELECT_COLUMNS: &str = "SELECT id, user_id, code, is_used, created_at, expires_at FROM one_time_codes";

/// MySQL implementation of OneTimeCodeRepository
pub struct MySqlOneTimeCodeRepository {
    pool: MySqlPool,
}

impl MySqlOneTimeCodeRepository {
    /// Create a new MySQL code store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Retire the user's active codes and insert `record` in one transaction
    ///
    /// Returns how many previous codes were retired.
    async fn replace_active(&self, record: &OneTimeCode) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let retired = sqlx::query(
            r#"
            UPDATE one_time_codes
            SET is_used = TRUE
            WHERE user_id = ? AND is_used = FALSE AND expires_at > ?
            "#,
        )
        .bind(&record.user_id)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO one_time_codes (id, user_id, code, is_used, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.user_id)
        .bind(&record.code)
        .bind(record.is_used)
        .bind(record.created_at)
        .bind(record.expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(retired.rows_affected())
    }

    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> DomainResult<OneTimeCode> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;

        Ok(OneTimeCode {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid code UUID: {}", e),
            })?,
            user_id: row.try_get("user_id").map_err(column_error("user_id"))?,
            code: row.try_get("code").map_err(column_error("code"))?,
            is_used: row.try_get("is_used").map_err(column_error("is_used"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(column_error("expires_at"))?,
        })
    }
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

/// MySQL reports deadlock victims (error 1213) with SQLSTATE 40001
pub(crate) fn is_deadlock(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.code().as_deref() == Some("40001"))
}

fn query_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to {}: {}", action, e),
    }
}

#[async_trait]
impl OneTimeCodeRepository for MySqlOneTimeCodeRepository {
    async fn create(&self, draft: NewOneTimeCode) -> DomainResult<OneTimeCode> {
        let record = draft.into_record();

        // first inserts for a user race on the same index gap; InnoDB picks a victim
        let retired = match self.replace_active(&record).await {
            Err(e) if is_deadlock(&e) => {
                tracing::warn!(user_id = %record.user_id, "Deadlock storing one-time code, retrying once");
                self.replace_active(&record).await
            }
            other => other,
        }
        .map_err(query_error("save one-time code"))?;

        if retired > 0 {
            tracing::debug!(retired, "Invalidated previously active codes");
        }

        Ok(record)
    }

    async fn find_active(&self, user_id: &str, code: &str) -> DomainResult<Option<OneTimeCode>> {
        let query = format!(
            "{} WHERE user_id = ? AND code = ? AND is_used = FALSE AND expires_at > ? \
             ORDER BY created_at DESC LIMIT 1",
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(user_id)
            .bind(code)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("find one-time code"))?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn find_latest_active(&self, user_id: &str) -> DomainResult<Option<OneTimeCode>> {
        let query = format!(
            "{} WHERE user_id = ? AND is_used = FALSE AND expires_at > ? \
             ORDER BY created_at DESC LIMIT 1",
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(user_id)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("find latest one-time code"))?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn mark_used(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE one_time_codes
            SET is_used = TRUE
            WHERE id = ? AND is_used = FALSE
            "#,
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_error("mark one-time code as used"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn purge_expired(&self, before: DateTime<Utc>) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM one_time_codes WHERE expires_at < ?")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(query_error("purge expired codes"))?;

        Ok(result.rows_affected())
    }
}
