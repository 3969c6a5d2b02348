//! Weight log repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Weight log record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeightLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub weight: Decimal,
    pub logged_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a weight log
#[derive(Debug, Clone)]
pub struct CreateWeightLog {
    pub user_id: Uuid,
    pub weight: f64,
    pub logged_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Weight repository for database operations
pub struct WeightRepository;

impl WeightRepository {
    /// Store a weigh-in and, when it is the newest entry, move the
    /// profile's current weight, in one transaction.
    ///
    /// Returns the stored entry and whether the current weight moved.
    pub async fn record_weigh_in(pool: &PgPool, input: CreateWeightLog) -> Result<(WeightLogRecord, bool)> {
        let mut tx = pool.begin().await?;

        let record = sqlx::query_as::<_, WeightLogRecord>(
            r#"
            INSERT INTO weight_logs (user_id, weight, logged_at, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, weight, logged_at, notes, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.weight)
        .bind(input.logged_at)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        let latest: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id
            FROM weight_logs
            WHERE user_id = $1
            ORDER BY logged_at DESC, created_at DESC
            LIMIT 1
            "#,
        )
        .bind(input.user_id)
        .fetch_optional(&mut *tx)
        .await?;

        // Backdated entries don't move the current weight
        let is_latest = latest.map(|(id,)| id) == Some(record.id);
        if is_latest {
            sqlx::query(
                r#"
                UPDATE profiles
                SET current_weight = $2, updated_at = NOW()
                WHERE user_id = $1
                "#,
            )
            .bind(input.user_id)
            .bind(input.weight)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok((record, is_latest))
    }

    /// Get the most recent entries, newest first
    pub async fn list_recent(pool: &PgPool, user_id: Uuid, limit: i64) -> Result<Vec<WeightLogRecord>> {
        let records = sqlx::query_as::<_, WeightLogRecord>(
            r#"
            SELECT id, user_id, weight, logged_at, notes, created_at
            FROM weight_logs
            WHERE user_id = $1
            ORDER BY logged_at DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
