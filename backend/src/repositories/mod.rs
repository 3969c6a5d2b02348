//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod goals;
pub mod profile;
pub mod weight;

pub use goals::{NutritionGoalsRecord, NutritionGoalsRepository};
pub use profile::{ProfileRecord, ProfileRepository};
pub use weight::{CreateWeightLog, WeightLogRecord, WeightRepository};
