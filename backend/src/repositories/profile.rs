//! Profile repository for database operations

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use weightcoach_shared::{ActivityLevel, FitnessGoal, Gender, UserProfile};

/// Profile record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub current_weight: Decimal,
    pub height: Decimal,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub activity_level: String,
    pub fitness_goal: String,
    pub goal_weight: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    /// Convert the stored row into the calculator's profile snapshot.
    ///
    /// Unrecognised stored strings fall back: gender to `Other`, activity
    /// level to moderately active, fitness goal to maintain weight.
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            current_weight: self.current_weight.to_f64().unwrap_or(0.0),
            height: self.height.to_f64().unwrap_or(0.0),
            date_of_birth: self.date_of_birth,
            gender: Gender::from_stored(&self.gender),
            activity_level: ActivityLevel::from_stored(&self.activity_level),
            fitness_goal: FitnessGoal::from_stored(&self.fitness_goal),
            goal_weight: self.goal_weight.and_then(|w| w.to_f64()),
        }
    }
}

const PROFILE_COLUMNS: &str = "user_id, current_weight, height, date_of_birth, gender, \
     activity_level, fitness_goal, goal_weight, created_at, updated_at";

/// Profile repository for database operations
pub struct ProfileRepository;

impl ProfileRepository {
    /// Find a profile by user ID
    pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRecord>> {
        let record = sqlx::query_as::<_, ProfileRecord>(&format!(
            "SELECT {} FROM profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Check whether a profile exists
    pub async fn exists(pool: &PgPool, user_id: Uuid) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM profiles WHERE user_id = $1)")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        Ok(exists.0)
    }

    /// Insert a new profile; `None` when the user already has one
    pub async fn create(pool: &PgPool, user_id: Uuid, profile: &UserProfile) -> Result<Option<ProfileRecord>> {
        let record = sqlx::query_as::<_, ProfileRecord>(&format!(
            r#"
            INSERT INTO profiles (user_id, current_weight, height, date_of_birth, gender,
                                  activity_level, fitness_goal, goal_weight)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(profile.current_weight)
        .bind(profile.height)
        .bind(profile.date_of_birth)
        .bind(profile.gender.as_str())
        .bind(profile.activity_level.as_str())
        .bind(profile.fitness_goal.as_str())
        .bind(profile.goal_weight)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Overwrite every profile field with an already-merged profile
    pub async fn update(pool: &PgPool, user_id: Uuid, profile: &UserProfile) -> Result<Option<ProfileRecord>> {
        let record = sqlx::query_as::<_, ProfileRecord>(&format!(
            r#"
            UPDATE profiles
            SET current_weight = $2,
                height = $3,
                date_of_birth = $4,
                gender = $5,
                activity_level = $6,
                fitness_goal = $7,
                goal_weight = $8,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(profile.current_weight)
        .bind(profile.height)
        .bind(profile.date_of_birth)
        .bind(profile.gender.as_str())
        .bind(profile.activity_level.as_str())
        .bind(profile.fitness_goal.as_str())
        .bind(profile.goal_weight)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
