//! Persistence collaborators for readings: the append-only history log and
//! the user lookup used to validate owners.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::fortune::{FortuneHistoryRow, FortuneType};
use crate::models::user::User;

/// A reading about to be logged.
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub user_id: Uuid,
    pub fortune_type: FortuneType,
    pub input_data: String,
    pub result_data: String,
    pub score: i32,
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Appends one record. Records are never updated or deleted here.
    async fn append(&self, entry: NewHistoryEntry) -> Result<FortuneHistoryRow, AppError>;

    /// All records for a user, most recent first.
    async fn list_for(&self, user_id: Uuid) -> Result<Vec<FortuneHistoryRow>, AppError>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
}

/// Postgres-backed implementation of both collaborators.
#[derive(Clone)]
pub struct PgFortuneStore {
    pool: PgPool,
}

impl PgFortuneStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for PgFortuneStore {
    async fn append(&self, entry: NewHistoryEntry) -> Result<FortuneHistoryRow, AppError> {
        // Append-only INSERT, never UPDATE
        let row = sqlx::query_as::<_, FortuneHistoryRow>(
            r#"
            INSERT INTO fortune_history
                (id, user_id, fortune_type, input_data, result_data, score)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(entry.fortune_type.as_str())
        .bind(&entry.input_data)
        .bind(&entry.result_data)
        .bind(entry.score)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Saved {} reading {} for user {}",
            entry.fortune_type, row.id, entry.user_id
        );
        Ok(row)
    }

    async fn list_for(&self, user_id: Uuid) -> Result<Vec<FortuneHistoryRow>, AppError> {
        Ok(sqlx::query_as::<_, FortuneHistoryRow>(
            "SELECT * FROM fortune_history WHERE user_id = $1 ORDER BY created_at DESC, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

#[async_trait]
impl UserDirectory for PgFortuneStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}
