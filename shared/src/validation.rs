//! Input validation functions
//!
//! The goal calculator assumes valid input. Everything that feeds it from the
//! outside (profile requests, weight logs) goes through these checks first.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::nutrition_goals::{calculate_age, UserProfile};

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate date of birth against `today`
/// Must be in the past, and age must be between 1 and 150 years
pub fn validate_date_of_birth(dob: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if dob >= today {
        return Err("Date of birth must be in the past".to_string());
    }

    match calculate_age(dob, today) {
        age if age < 1 => Err("Age must be at least 1 year".to_string()),
        age if age > 150 => Err("Age cannot exceed 150 years".to_string()),
        _ => Ok(()),
    }
}

/// Clock skew tolerated between client and server when logging a weigh-in
pub const MAX_LOGGED_AT_SKEW_SECS: i64 = 300;

/// Validate a weigh-in timestamp against `now`; future entries are rejected
pub fn validate_logged_at(logged_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), String> {
    if logged_at > now + Duration::seconds(MAX_LOGGED_AT_SKEW_SECS) {
        return Err("Weigh-in time cannot be in the future".to_string());
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" | "current_weight" => "Current Weight",
        "goal_weight" => "Goal Weight",
        "height" | "height_cm" => "Height",
        "date_of_birth" => "Date of Birth",
        "gender" => "Gender",
        "activity_level" => "Activity Level",
        "fitness_goal" => "Fitness Goal",
        "auto_recalculate" => "Automatic Recalculation",
        "logged_at" => "Weigh-in Time",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Validate a complete profile before it reaches the calculator
pub fn validate_profile(profile: &UserProfile, today: NaiveDate) -> Result<(), ValidationError> {
    validate_weight(profile.current_weight)
        .map_err(|msg| ValidationError::new("current_weight", &msg))?;
    validate_height_cm(profile.height).map_err(|msg| ValidationError::new("height", &msg))?;
    validate_date_of_birth(profile.date_of_birth, today)
        .map_err(|msg| ValidationError::new("date_of_birth", &msg))?;
    if let Some(goal_weight) = profile.goal_weight {
        validate_weight(goal_weight).map_err(|msg| ValidationError::new("goal_weight", &msg))?;
    }
    Ok(())
}
