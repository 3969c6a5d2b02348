//! Nutrition goals repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use weightcoach_shared::{GoalIntensity, NutritionGoals};

/// Nutrition goals record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NutritionGoalsRecord {
    pub user_id: Uuid,
    pub bmr: i32,
    pub tdee: i32,
    pub daily_calories: i32,
    pub daily_protein: i32,
    pub daily_carbs: i32,
    pub daily_fat: i32,
    pub goal_intensity: String,
    pub auto_recalculate: bool,
    pub last_calculated_weight: Option<Decimal>,
    pub last_recalculated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NutritionGoalsRecord {
    /// The calculated fields as a calculator result
    pub fn goals(&self) -> NutritionGoals {
        NutritionGoals {
            bmr: self.bmr,
            tdee: self.tdee,
            daily_calories: self.daily_calories,
            daily_protein: self.daily_protein,
            daily_carbs: self.daily_carbs,
            daily_fat: self.daily_fat,
            goal_intensity: GoalIntensity::from_stored(&self.goal_intensity),
        }
    }
}

const GOALS_COLUMNS: &str = "user_id, bmr, tdee, daily_calories, daily_protein, daily_carbs, \
     daily_fat, goal_intensity, auto_recalculate, last_calculated_weight, last_recalculated_at, \
     created_at, updated_at";

/// Nutrition goals repository
pub struct NutritionGoalsRepository;

impl NutritionGoalsRepository {
    /// Find the stored goals for a user
    pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<NutritionGoalsRecord>> {
        let record = sqlx::query_as::<_, NutritionGoalsRecord>(&format!(
            "SELECT {} FROM nutrition_goals WHERE user_id = $1",
            GOALS_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Replace all calculated fields in one statement.
    ///
    /// `auto_recalculate` keeps its stored value (or the column default on insert).
    pub async fn upsert(
        pool: &PgPool,
        user_id: Uuid,
        goals: &NutritionGoals,
        calculated_weight: f64,
        calculated_at: DateTime<Utc>,
    ) -> Result<NutritionGoalsRecord> {
        let record = sqlx::query_as::<_, NutritionGoalsRecord>(&format!(
            r#"
            INSERT INTO nutrition_goals (user_id, bmr, tdee, daily_calories, daily_protein,
                                         daily_carbs, daily_fat, goal_intensity,
                                         last_calculated_weight, last_recalculated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id) DO UPDATE SET
                bmr = EXCLUDED.bmr,
                tdee = EXCLUDED.tdee,
                daily_calories = EXCLUDED.daily_calories,
                daily_protein = EXCLUDED.daily_protein,
                daily_carbs = EXCLUDED.daily_carbs,
                daily_fat = EXCLUDED.daily_fat,
                goal_intensity = EXCLUDED.goal_intensity,
                last_calculated_weight = EXCLUDED.last_calculated_weight,
                last_recalculated_at = EXCLUDED.last_recalculated_at,
                updated_at = NOW()
            RETURNING {}
            "#,
            GOALS_COLUMNS
        ))
        .bind(user_id)
        .bind(goals.bmr)
        .bind(goals.tdee)
        .bind(goals.daily_calories)
        .bind(goals.daily_protein)
        .bind(goals.daily_carbs)
        .bind(goals.daily_fat)
        .bind(goals.goal_intensity.as_str())
        .bind(calculated_weight)
        .bind(calculated_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Toggle automatic recalculation; `None` when the user has no goals yet
    pub async fn set_auto_recalculate(
        pool: &PgPool,
        user_id: Uuid,
        auto_recalculate: bool,
    ) -> Result<Option<NutritionGoalsRecord>> {
        let record = sqlx::query_as::<_, NutritionGoalsRecord>(&format!(
            r#"
            UPDATE nutrition_goals
            SET auto_recalculate = $2, updated_at = NOW()
            WHERE user_id = $1
            RETURNING {}
            "#,
            GOALS_COLUMNS
        ))
        .bind(user_id)
        .bind(auto_recalculate)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
