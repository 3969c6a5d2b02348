//! API request and response types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::nutrition_goals::{
    ActivityLevel, FitnessGoal, Gender, GoalIntensity, NutritionGoals, UserProfile,
};

// ============================================================================
// Profile Types
// ============================================================================

/// Profile creation request. Weights in kg, height in cm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    pub current_weight: f64,
    pub height: f64,
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub fitness_goal: FitnessGoal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<f64>,
}

impl From<CreateProfileRequest> for UserProfile {
    fn from(req: CreateProfileRequest) -> Self {
        UserProfile {
            current_weight: req.current_weight,
            height: req.height,
            date_of_birth: req.date_of_birth,
            gender: req.gender,
            activity_level: req.activity_level,
            fitness_goal: req.fitness_goal,
            goal_weight: req.goal_weight,
        }
    }
}

/// Partial profile update; absent fields keep their stored value
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<FitnessGoal>,
    /// Absent keeps the stored target; `null` clears it
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub goal_weight: Option<Option<f64>>,
}

/// Distinguish a key sent as `null` (`Some(None)`) from an absent key (`None`)
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateProfileRequest {
    /// Merge this update over an existing profile
    pub fn apply_to(&self, profile: &UserProfile) -> UserProfile {
        UserProfile {
            current_weight: self.current_weight.unwrap_or(profile.current_weight),
            height: self.height.unwrap_or(profile.height),
            date_of_birth: self.date_of_birth.unwrap_or(profile.date_of_birth),
            gender: self.gender.unwrap_or(profile.gender),
            activity_level: self.activity_level.unwrap_or(profile.activity_level),
            fitness_goal: self.fitness_goal.unwrap_or(profile.fitness_goal),
            goal_weight: self.goal_weight.unwrap_or(profile.goal_weight),
        }
    }
}

/// User profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub current_weight: f64,
    pub height: f64,
    pub date_of_birth: NaiveDate,
    pub age_years: i32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub fitness_goal: FitnessGoal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Returned by profile create/update: the profile and the goals calculated from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileWithGoalsResponse {
    pub profile: ProfileResponse,
    pub goals: NutritionGoalsResponse,
}

// ============================================================================
// Nutrition Goal Types
// ============================================================================

/// Stored nutrition goals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionGoalsResponse {
    pub bmr: i32,
    pub tdee: i32,
    pub daily_calories: i32,
    pub daily_protein: i32,
    pub daily_carbs: i32,
    pub daily_fat: i32,
    pub goal_intensity: GoalIntensity,
    /// Calories implied by the macro split, for display alongside daily_calories
    pub macro_calories: i32,
    pub auto_recalculate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_calculated_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_recalculated_at: Option<DateTime<Utc>>,
}

impl NutritionGoalsResponse {
    pub fn new(
        goals: NutritionGoals,
        auto_recalculate: bool,
        last_calculated_weight: Option<f64>,
        last_recalculated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            bmr: goals.bmr,
            tdee: goals.tdee,
            daily_calories: goals.daily_calories,
            daily_protein: goals.daily_protein,
            daily_carbs: goals.daily_carbs,
            daily_fat: goals.daily_fat,
            goal_intensity: goals.goal_intensity,
            macro_calories: goals.macro_calories(),
            auto_recalculate,
            last_calculated_weight,
            last_recalculated_at,
        }
    }
}

/// Whether stored goals are due for recalculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculationStatusResponse {
    pub should_recalculate: bool,
    pub auto_recalculate: bool,
    pub current_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_calculated_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_recalculated_at: Option<DateTime<Utc>>,
}

/// Goal settings update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGoalSettingsRequest {
    pub auto_recalculate: bool,
}

// ============================================================================
// Weight Log Types
// ============================================================================

/// Weight log entry request (kg)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogWeightRequest {
    pub weight: f64,
    #[serde(default = "Utc::now")]
    pub logged_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Weight log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightLogResponse {
    pub id: String,
    pub weight: f64,
    pub logged_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Result of logging a weight: the entry plus any goal recalculation it caused
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogWeightResponse {
    pub entry: WeightLogResponse,
    pub goals_recalculated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<NutritionGoalsResponse>,
}

/// Weight history query parameters
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeightHistoryQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

impl WeightHistoryQuery {
    pub const DEFAULT_LIMIT: i64 = 30;
    pub const MAX_LIMIT: i64 = 100;

    /// Effective limit, clamped to 1..=100
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}

/// Weight history response, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightHistoryResponse {
    pub items: Vec<WeightLogResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> UserProfile {
        UserProfile {
            current_weight: 90.0,
            height: 182.0,
            date_of_birth: NaiveDate::from_ymd_opt(1985, 4, 20).unwrap(),
            gender: Gender::Male,
            activity_level: ActivityLevel::Sedentary,
            fitness_goal: FitnessGoal::LoseWeight,
            goal_weight: Some(80.0),
        }
    }

    #[test]
    fn test_update_keeps_absent_fields() {
        let update = UpdateProfileRequest {
            activity_level: Some(ActivityLevel::VeryActive),
            ..Default::default()
        };
        let merged = update.apply_to(&stored());
        assert_eq!(merged.activity_level, ActivityLevel::VeryActive);
        assert_eq!(merged.current_weight, 90.0);
        assert_eq!(merged.goal_weight, Some(80.0));
    }

    #[test]
    fn test_update_goal_weight_absent_set_or_cleared() {
        let keep: UpdateProfileRequest = serde_json::from_str(r#"{"height": 181}"#).unwrap();
        assert_eq!(keep.goal_weight, None);
        assert_eq!(keep.apply_to(&stored()).goal_weight, Some(80.0));

        let set: UpdateProfileRequest = serde_json::from_str(r#"{"goal_weight": 85.5}"#).unwrap();
        assert_eq!(set.apply_to(&stored()).goal_weight, Some(85.5));

        let clear: UpdateProfileRequest =
            serde_json::from_str(r#"{"fitness_goal": "maintain_weight", "goal_weight": null}"#)
                .unwrap();
        assert_eq!(clear.goal_weight, Some(None));
        let merged = clear.apply_to(&stored());
        assert_eq!(merged.goal_weight, None);
        assert_eq!(merged.fitness_goal, FitnessGoal::MaintainWeight);
    }

    #[test]
    fn test_create_request_deserializes_wire_names() {
        let req: CreateProfileRequest = serde_json::from_str(
            r#"{
                "current_weight": 72.5,
                "height": 168,
                "date_of_birth": "1992-11-03",
                "gender": "other",
                "activity_level": "extremely_active",
                "fitness_goal": "recomposition"
            }"#,
        )
        .unwrap();
        let profile = UserProfile::from(req);
        assert_eq!(profile.gender, Gender::Other);
        assert_eq!(profile.activity_level, ActivityLevel::ExtremelyActive);
        assert_eq!(profile.goal_weight, None);
    }

    #[test]
    fn test_create_request_rejects_unknown_goal() {
        let result = serde_json::from_str::<CreateProfileRequest>(
            r#"{
                "current_weight": 72.5,
                "height": 168,
                "date_of_birth": "1992-11-03",
                "gender": "female",
                "activity_level": "sedentary",
                "fitness_goal": "get_shredded"
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_weight_history_limit() {
        assert_eq!(WeightHistoryQuery::default().limit(), 30);
        assert_eq!(WeightHistoryQuery { limit: Some(0) }.limit(), 1);
        assert_eq!(WeightHistoryQuery { limit: Some(500) }.limit(), 100);
    }

    #[test]
    fn test_goals_response_includes_macro_calories() {
        let goals = NutritionGoals {
            bmr: 1700,
            tdee: 2300,
            daily_calories: 1800,
            daily_protein: 150,
            daily_carbs: 187,
            daily_fat: 50,
            goal_intensity: GoalIntensity::Moderate,
        };
        let response = NutritionGoalsResponse::new(goals, true, Some(75.0), None);
        assert_eq!(response.macro_calories, 150 * 4 + 50 * 9 + 187 * 4);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["goal_intensity"], "moderate");
        assert!(json.get("last_recalculated_at").is_none());
    }
}
