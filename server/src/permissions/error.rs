//! Guard rejection types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use super::caller::RequirementSet;

/// Why a guarded request was not let through.
#[derive(Debug, Error)]
pub enum GuardError {
    /// No caller identity on the request.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// The identity no longer maps to a user.
    #[error("Caller not found")]
    CallerNotFound,

    /// The caller does not hold every required permission.
    #[error("Insufficient permissions")]
    PermissionDenied {
        required: RequirementSet,
        resource: Option<String>,
    },

    /// Admin-only decision point, caller is not an admin.
    #[error("Admin role required")]
    AdminRequired,

    /// Caller lookup or another unexpected step failed.
    #[error("Internal server error")]
    Internal {
        /// Returned to clients only outside production.
        detail: Option<String>,
    },
}

impl GuardError {
    /// Log `cause` and build an internal error, keeping the detail only when
    /// `expose_detail` is set.
    pub fn internal(cause: impl std::fmt::Display, expose_detail: bool) -> Self {
        let detail = cause.to_string();
        tracing::error!(error = %detail, "Guard failed internally");
        Self::Internal {
            detail: expose_detail.then_some(detail),
        }
    }
}

#[derive(Debug, Serialize)]
struct GuardErrorBody<'a> {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<&'a RequirementSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        // Unknown callers get the same answer as anonymous ones
        let (status, code) = match &self {
            Self::AuthenticationRequired | Self::CallerNotFound => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED")
            }
            Self::PermissionDenied { .. } => (StatusCode::FORBIDDEN, "PERMISSION_DENIED"),
            Self::AdminRequired => (StatusCode::FORBIDDEN, "ADMIN_REQUIRED"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let message = match &self {
            Self::CallerNotFound => Self::AuthenticationRequired.to_string(),
            other => other.to_string(),
        };

        let mut body = GuardErrorBody {
            error: code,
            message,
            required: None,
            resource: None,
            detail: None,
        };
        match &self {
            Self::PermissionDenied { required, resource } => {
                body.required = Some(required);
                body.resource = resource.as_deref();
            }
            Self::Internal { detail } => body.detail = detail.as_deref(),
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}
