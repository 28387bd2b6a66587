//! Grant context attached to allowed requests.

use serde::Serialize;
use uuid::Uuid;
use warden_common::Role;

use super::caller::RequirementSet;
use super::error::GuardError;
use super::evaluator::Basis;

/// What the guard established about an allowed request.
///
/// Inserted into request extensions; handlers take it as an extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantContext {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    /// The requirement set the guard was configured with.
    pub permissions: RequirementSet,
    pub resource: Option<String>,
    pub basis: Basis,
}

impl<S> axum::extract::FromRequestParts<S> for GrantContext
where
    S: Send + Sync,
{
    type Rejection = GuardError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        // Reaching a handler without a guard in front is a routing mistake
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| GuardError::internal("route is not guarded", false))
    }
}
