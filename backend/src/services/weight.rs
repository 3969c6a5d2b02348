//! Weight log service
//!
//! Logging a weigh-in moves the profile's current weight and may trigger
//! an automatic goal recalculation.

use crate::error::ApiError;
use crate::repositories::{CreateWeightLog, ProfileRepository, WeightLogRecord, WeightRepository};
use crate::services::goals::{trigger, GoalsService};
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use weightcoach_shared::validation::{validate_logged_at, validate_weight, ValidationError};
use weightcoach_shared::{
    LogWeightRequest, LogWeightResponse, WeightHistoryResponse, WeightLogResponse,
};

/// Weight log service
pub struct WeightService;

impl WeightService {
    /// Log a weight entry, then recalculate goals if they have gone stale
    pub async fn log_weight(
        db: &PgPool,
        user_id: Uuid,
        req: LogWeightRequest,
    ) -> Result<LogWeightResponse, ApiError> {
        validate_weight(req.weight).map_err(|msg| ValidationError::new("weight", &msg))?;
        validate_logged_at(req.logged_at, Utc::now())
            .map_err(|msg| ValidationError::new("logged_at", &msg))?;

        if !ProfileRepository::exists(db, user_id)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::NotFound("Profile not found".to_string()));
        }

        let (entry, moved_current_weight) = WeightRepository::record_weigh_in(
            db,
            CreateWeightLog {
                user_id,
                weight: req.weight,
                logged_at: req.logged_at,
                notes: req.notes,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        metrics::counter!("weight_logged_total").increment(1);
        info!(user_id = %user_id, weight = req.weight, moved_current_weight, "Weight logged");

        let goals = GoalsService::recalculate_if_stale(db, user_id, trigger::WEIGHT_LOG).await?;

        Ok(LogWeightResponse {
            entry: Self::to_response(&entry),
            goals_recalculated: goals.is_some(),
            goals,
        })
    }

    /// Weight history, newest first
    pub async fn history(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<WeightHistoryResponse, ApiError> {
        let records = WeightRepository::list_recent(db, user_id, limit)
            .await
            .map_err(ApiError::Internal)?;

        Ok(WeightHistoryResponse {
            items: records.iter().map(Self::to_response).collect(),
        })
    }

    fn to_response(record: &WeightLogRecord) -> WeightLogResponse {
        WeightLogResponse {
            id: record.id.to_string(),
            weight: record.weight.to_f64().unwrap_or(0.0),
            logged_at: record.logged_at,
            notes: record.notes.clone(),
        }
    }
}
