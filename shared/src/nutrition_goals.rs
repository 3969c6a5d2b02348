//! Nutrition goal calculations
//!
//! Turns a user profile snapshot into daily nutrition targets: BMR, TDEE,
//! a calorie goal with an intensity tier, and a protein/fat/carb split.
//! Also decides whether a stored set of goals is stale enough to recompute.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: No I/O, no clock reads. "Today" and "now" are arguments.
//! 2. **Closed Types**: Gender, activity level, goal and intensity are enums.
//! 3. **Visible Fallbacks**: Unknown stored strings resolve through explicit match arms.
//!
//! # Preserved numeric behavior
//!
//! - The calorie clamp is a three-way maximum, see [`clamp_calorie_goal`].
//! - Carbohydrate grams are not floored at zero, see [`calculate_carbs_goal`].
//! - `Gender::Other` averages the male and female Mifflin-St Jeor offsets.
//!   This is a modeling simplification, not a physiological claim.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseEnumError;

/// Hard lower bound on the daily calorie goal
pub const MIN_DAILY_CALORIES: i32 = 1200;

/// Largest surplus any goal configuration may produce
pub const MAX_SURPLUS_KCAL: i32 = 500;

/// Largest deficit any goal configuration may produce
pub const MAX_DEFICIT_KCAL: i32 = 1000;

/// Fraction of daily calories assigned to fat
pub const FAT_CALORIE_SHARE: f64 = 0.25;

pub const KCAL_PER_GRAM_PROTEIN: i32 = 4;
pub const KCAL_PER_GRAM_CARBS: i32 = 4;
pub const KCAL_PER_GRAM_FAT: i32 = 9;

/// Weight change (percent of the last calculated weight) that triggers recalculation
pub const RECALCULATE_WEIGHT_CHANGE_PERCENT: f64 = 5.0;

/// Goals older than this many days are recalculated
pub const RECALCULATE_MAX_AGE_DAYS: i64 = 90;

// ============================================================================
// Profile Types
// ============================================================================

/// Gender used for the BMR offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Resolve a stored gender; unknown keys take the averaged formula
    pub fn from_stored(raw: &str) -> Self {
        match raw {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    #[default]
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise or physical job
    ExtremelyActive,
}

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }

    /// Resolve a stored activity level.
    ///
    /// Only the exact snake_case keys match; anything else, including other
    /// casings, falls back to moderately active.
    pub fn from_stored(raw: &str) -> Self {
        match raw {
            "sedentary" => ActivityLevel::Sedentary,
            "lightly_active" => ActivityLevel::LightlyActive,
            "moderately_active" => ActivityLevel::ModeratelyActive,
            "very_active" => ActivityLevel::VeryActive,
            "extremely_active" => ActivityLevel::ExtremelyActive,
            _ => ActivityLevel::ModeratelyActive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }
}

/// What the user is working towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    LoseWeight,
    MaintainWeight,
    BuildMuscle,
    Recomposition,
}

impl FitnessGoal {
    /// Resolve a stored fitness goal.
    ///
    /// Unknown values map to `MaintainWeight`: zero calorie adjustment,
    /// 1.6 g/kg protein and moderate intensity.
    pub fn from_stored(raw: &str) -> Self {
        match raw {
            "lose_weight" => FitnessGoal::LoseWeight,
            "maintain_weight" => FitnessGoal::MaintainWeight,
            "build_muscle" => FitnessGoal::BuildMuscle,
            "recomposition" => FitnessGoal::Recomposition,
            _ => FitnessGoal::MaintainWeight,
        }
    }

    /// Protein target in grams per kilogram of body weight
    pub fn protein_per_kg(&self) -> f64 {
        match self {
            FitnessGoal::LoseWeight => 2.0,
            FitnessGoal::MaintainWeight => 1.6,
            FitnessGoal::BuildMuscle => 2.2,
            FitnessGoal::Recomposition => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::LoseWeight => "lose_weight",
            FitnessGoal::MaintainWeight => "maintain_weight",
            FitnessGoal::BuildMuscle => "build_muscle",
            FitnessGoal::Recomposition => "recomposition",
        }
    }
}

/// How hard the calorie adjustment pushes relative to TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalIntensity {
    Slow,
    Moderate,
    Aggressive,
}

impl GoalIntensity {
    /// Resolve a stored intensity, falling back to moderate
    pub fn from_stored(raw: &str) -> Self {
        match raw {
            "slow" => GoalIntensity::Slow,
            "aggressive" => GoalIntensity::Aggressive,
            _ => GoalIntensity::Moderate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalIntensity::Slow => "slow",
            GoalIntensity::Moderate => "moderate",
            GoalIntensity::Aggressive => "aggressive",
        }
    }
}

macro_rules! impl_enum_strings {
    ($ty:ident, $name:literal, [$($variant:ident),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_lowercase();
                $(
                    if normalized == $ty::$variant.as_str() {
                        return Ok($ty::$variant);
                    }
                )+
                Err(ParseEnumError::new($name, s, &[$($ty::$variant.as_str()),+]))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_enum_strings!(Gender, "gender", [Male, Female, Other]);
impl_enum_strings!(
    ActivityLevel,
    "activity level",
    [Sedentary, LightlyActive, ModeratelyActive, VeryActive, ExtremelyActive]
);
impl_enum_strings!(
    FitnessGoal,
    "fitness goal",
    [LoseWeight, MaintainWeight, BuildMuscle, Recomposition]
);
impl_enum_strings!(GoalIntensity, "goal intensity", [Slow, Moderate, Aggressive]);

/// Profile snapshot consumed by the calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Current weight in kilograms
    pub current_weight: f64,
    /// Height in centimeters
    pub height: f64,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub fitness_goal: FitnessGoal,
    /// Target weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<f64>,
}

/// Complete set of daily targets produced by one calculation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionGoals {
    pub bmr: i32,
    pub tdee: i32,
    pub daily_calories: i32,
    pub daily_protein: i32,
    pub daily_carbs: i32,
    pub daily_fat: i32,
    pub goal_intensity: GoalIntensity,
}

impl NutritionGoals {
    /// Calories implied by the macro split
    pub fn macro_calories(&self) -> i32 {
        self.daily_protein * KCAL_PER_GRAM_PROTEIN
            + self.daily_fat * KCAL_PER_GRAM_FAT
            + self.daily_carbs * KCAL_PER_GRAM_CARBS
    }
}

/// Round to the nearest integer, ties towards positive infinity
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

// ============================================================================
// Energy Expenditure
// ============================================================================

/// Whole years elapsed between `date_of_birth` and `today`
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// common = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y)
/// - Male: common + 5
/// - Female: common - 161
/// - Other: common - 78 (mean of the two)
///
/// The result is not clamped; implausible inputs can yield a negative BMR.
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: i32, gender: Gender) -> i32 {
    let common = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    let bmr = match gender {
        Gender::Male => common + 5.0,
        Gender::Female => common - 161.0,
        Gender::Other => ((common + 5.0) + (common - 161.0)) / 2.0,
    };
    round_half_up(bmr)
}

/// Multiplier for a raw activity level string; unknown values use 1.55
pub fn activity_multiplier(raw: &str) -> f64 {
    ActivityLevel::from_stored(raw).multiplier()
}

/// Total Daily Energy Expenditure
pub fn calculate_tdee(bmr: i32, activity_level: ActivityLevel) -> i32 {
    round_half_up(bmr as f64 * activity_level.multiplier())
}

// ============================================================================
// Calorie Goal
// ============================================================================

/// Pick an intensity tier from the weight gap and the fitness goal
pub fn determine_goal_intensity(
    current_weight: f64,
    goal_weight: Option<f64>,
    fitness_goal: FitnessGoal,
) -> GoalIntensity {
    let goal_weight = match goal_weight {
        Some(w) => w,
        None => return GoalIntensity::Moderate,
    };

    match fitness_goal {
        FitnessGoal::LoseWeight => {
            let delta = (current_weight - goal_weight).abs();
            if delta > 20.0 {
                GoalIntensity::Aggressive
            } else if delta > 10.0 {
                GoalIntensity::Moderate
            } else {
                GoalIntensity::Slow
            }
        }
        // Capped so a bulk does not turn into excess fat gain
        FitnessGoal::BuildMuscle => GoalIntensity::Moderate,
        FitnessGoal::MaintainWeight | FitnessGoal::Recomposition => GoalIntensity::Moderate,
    }
}

/// Daily calorie adjustment relative to TDEE
pub fn calorie_adjustment(fitness_goal: FitnessGoal, intensity: GoalIntensity) -> i32 {
    match (fitness_goal, intensity) {
        (FitnessGoal::LoseWeight, GoalIntensity::Slow) => -250,
        (FitnessGoal::LoseWeight, GoalIntensity::Moderate) => -500,
        (FitnessGoal::LoseWeight, GoalIntensity::Aggressive) => -750,
        (FitnessGoal::MaintainWeight, _) => 0,
        (FitnessGoal::BuildMuscle, GoalIntensity::Slow) => 200,
        (FitnessGoal::BuildMuscle, GoalIntensity::Moderate) => 300,
        (FitnessGoal::BuildMuscle, GoalIntensity::Aggressive) => 500,
        (FitnessGoal::Recomposition, GoalIntensity::Slow) => -200,
        (FitnessGoal::Recomposition, GoalIntensity::Moderate) => -200,
        (FitnessGoal::Recomposition, GoalIntensity::Aggressive) => -300,
    }
}

/// Apply the safety bounds to a raw calorie target.
///
/// This is a three-way maximum, `max(1200, min(target, tdee + 500), tdee - 1000)`,
/// not a two-sided clamp: a target far below `tdee - 1000` comes back as
/// `tdee - 1000`, which can sit above the requested deficit.
pub fn clamp_calorie_goal(target: i32, tdee: i32) -> i32 {
    let capped = target.min(tdee + MAX_SURPLUS_KCAL);
    MIN_DAILY_CALORIES.max(capped).max(tdee - MAX_DEFICIT_KCAL)
}

/// Daily calorie goal for a goal and intensity tier
pub fn calculate_calorie_goal(tdee: i32, fitness_goal: FitnessGoal, intensity: GoalIntensity) -> i32 {
    let target = tdee + calorie_adjustment(fitness_goal, intensity);
    clamp_calorie_goal(target, tdee)
}

// ============================================================================
// Macronutrients
// ============================================================================

/// Protein grams per day from body weight and goal
pub fn calculate_protein_goal(weight_kg: f64, fitness_goal: FitnessGoal) -> i32 {
    round_half_up(weight_kg * fitness_goal.protein_per_kg())
}

/// Fat grams per day: 25% of calories at 9 kcal/g
pub fn calculate_fat_goal(daily_calories: i32) -> i32 {
    round_half_up(daily_calories as f64 * FAT_CALORIE_SHARE / KCAL_PER_GRAM_FAT as f64)
}

/// Carbohydrate grams per day: whatever calories protein and fat leave over.
///
/// Not floored at zero. When protein and fat already exceed the calorie
/// budget the result is negative and callers decide how to present it.
pub fn calculate_carbs_goal(daily_calories: i32, protein_g: i32, fat_g: i32) -> i32 {
    let remaining =
        daily_calories - protein_g * KCAL_PER_GRAM_PROTEIN - fat_g * KCAL_PER_GRAM_FAT;
    round_half_up(remaining as f64 / KCAL_PER_GRAM_CARBS as f64)
}

// ============================================================================
// Full Calculation Pass
// ============================================================================

/// Calculate every target for a profile as of `today`
pub fn calculate_all_goals(profile: &UserProfile, today: NaiveDate) -> NutritionGoals {
    let age = calculate_age(profile.date_of_birth, today);
    let bmr = calculate_bmr(profile.current_weight, profile.height, age, profile.gender);
    let tdee = calculate_tdee(bmr, profile.activity_level);
    let goal_intensity =
        determine_goal_intensity(profile.current_weight, profile.goal_weight, profile.fitness_goal);
    let daily_calories = calculate_calorie_goal(tdee, profile.fitness_goal, goal_intensity);
    let daily_protein = calculate_protein_goal(profile.current_weight, profile.fitness_goal);
    let daily_fat = calculate_fat_goal(daily_calories);
    let daily_carbs = calculate_carbs_goal(daily_calories, daily_protein, daily_fat);

    NutritionGoals {
        bmr,
        tdee,
        daily_calories,
        daily_protein,
        daily_carbs,
        daily_fat,
        goal_intensity,
    }
}

/// Decide whether stored goals should be recalculated.
///
/// Callers must not pass a zero `last_calculated_weight`.
pub fn should_recalculate_goals(
    current_weight: f64,
    last_calculated_weight: f64,
    last_recalculated_at: Option<DateTime<Utc>>,
    auto_recalculate: bool,
    now: DateTime<Utc>,
) -> bool {
    if !auto_recalculate {
        return false;
    }

    let last_recalculated_at = match last_recalculated_at {
        Some(at) => at,
        None => return true,
    };

    let change_percent =
        (current_weight - last_calculated_weight).abs() / last_calculated_weight * 100.0;
    if change_percent >= RECALCULATE_WEIGHT_CHANGE_PERCENT {
        return true;
    }

    now - last_recalculated_at > Duration::days(RECALCULATE_MAX_AGE_DAYS)
}
