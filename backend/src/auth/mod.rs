//! Authentication module
//!
//! Validates bearer tokens issued by the hosted auth provider.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtService};
pub use middleware::AuthUser;
