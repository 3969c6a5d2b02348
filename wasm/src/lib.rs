//! Weight Coach WASM Module
//!
//! Browser bindings for the nutrition goal calculator, so the web client
//! can preview goals while the user fills in the profile form.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use weightcoach_shared::validation::validate_profile;
use weightcoach_shared::{
    calculate_age, calculate_all_goals, ActivityLevel, CreateProfileRequest, Gender,
    NutritionGoals, UserProfile,
};

/// Calculate goals for a profile given as JSON.
///
/// `today` is the client's local date (YYYY-MM-DD). Returns the goals as
/// JSON, or throws with a user-facing message when the profile is invalid.
#[wasm_bindgen(js_name = calculateNutritionGoals)]
pub fn calculate_nutrition_goals(profile_json: &str, today: &str) -> Result<String, JsValue> {
    preview_goals(profile_json, today).map_err(|e| JsValue::from_str(&e))
}

/// BMR for the given inputs; unknown gender strings use the averaged formula
#[wasm_bindgen(js_name = calculateBmr)]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: i32, gender: &str) -> i32 {
    let gender = Gender::from_stored(gender);
    weightcoach_shared::calculate_bmr(weight_kg, height_cm, age_years, gender)
}

/// TDEE for a BMR; unknown activity levels use the moderately active multiplier
#[wasm_bindgen(js_name = calculateTdee)]
pub fn calculate_tdee(bmr: i32, activity_level: &str) -> i32 {
    weightcoach_shared::calculate_tdee(bmr, ActivityLevel::from_stored(activity_level))
}

/// Whether stored goals are due for recalculation.
///
/// Timestamps are milliseconds since the Unix epoch, as `Date.now()` gives them.
#[wasm_bindgen(js_name = shouldRecalculateGoals)]
pub fn should_recalculate_goals(
    current_weight: f64,
    last_calculated_weight: f64,
    last_recalculated_at_ms: Option<f64>,
    auto_recalculate: bool,
    now_ms: f64,
) -> bool {
    let Some(now) = DateTime::from_timestamp_millis(now_ms as i64) else {
        return false;
    };
    let last_recalculated_at =
        last_recalculated_at_ms.and_then(|ms| DateTime::from_timestamp_millis(ms as i64));

    weightcoach_shared::should_recalculate_goals(
        current_weight,
        last_calculated_weight,
        last_recalculated_at,
        auto_recalculate,
        now,
    )
}

fn preview_goals(profile_json: &str, today: &str) -> Result<String, String> {
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Expected YYYY-MM-DD", today))?;

    let form: CreateProfileRequest =
        serde_json::from_str(profile_json).map_err(|e| e.to_string())?;
    let profile = UserProfile::from(form);
    validate_profile(&profile, today).map_err(|e| e.user_message())?;

    let goals = calculate_all_goals(&profile, today);
    serde_json::to_string(&GoalsPreview::new(&goals, calculate_age(profile.date_of_birth, today)))
        .map_err(|e| e.to_string())
}

#[derive(Serialize)]
struct GoalsPreview {
    #[serde(flatten)]
    goals: NutritionGoals,
    macro_calories: i32,
    age_years: i32,
}

impl GoalsPreview {
    fn new(goals: &NutritionGoals, age_years: i32) -> Self {
        Self {
            goals: *goals,
            macro_calories: goals.macro_calories(),
            age_years,
        }
    }
}
