//! Authentication
//!
//! Token verification only: establishes who is calling. Deciding what the
//! caller may do lives in [`crate::permissions`].

mod error;
pub mod jwt;
mod middleware;

pub use error::{AuthError, AuthResult, ErrorResponse};
pub use middleware::{establish_identity, CallerIdentity};
