//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the goal calculator.

pub mod goals;
pub mod profile;
pub mod weight;

pub use goals::GoalsService;
pub use profile::ProfileService;
pub use weight::WeightService;
