//! Weight Coach Shared Library
//!
//! This crate contains the nutrition goal calculator, profile enums, API
//! types and validation used across the backend and WASM modules.

pub mod errors;
pub mod nutrition_goals;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use nutrition_goals::*;
pub use types::*;
