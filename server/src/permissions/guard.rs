//! Guard factory.
//!
//! A guard is a decision point bound to a fixed requirement set and options.
//! `check` is the transport independent part; `into_middleware` adapts it to
//! axum so routes can be gated before their handler runs.
//!
//! # Usage
//!
//! ```ignore
//! use axum::middleware::from_fn;
//!
//! let products = Router::new()
//!     .route("/", post(create_product))
//!     .route_layer(from_fn(
//!         guard::require(Permission::CreateProducts, DecisionOptions::new().resource("products"))
//!             .into_middleware(state.clone()),
//!     ));
//! ```

use std::future::Future;
use std::pin::Pin;

use axum::extract::{FromRequestParts, RawPathParams, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use crate::api::AppState;
use crate::auth::CallerIdentity;

use super::caller::{Caller, RequirementSet};
use super::context::GrantContext;
use super::error::GuardError;
use super::evaluator::{evaluate, Basis, Verdict};
use super::options::DecisionOptions;

/// Middleware closure shape accepted by `axum::middleware::from_fn`.
pub type GuardFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Build a guard demanding every permission in `required`.
pub fn require(required: impl Into<RequirementSet>, options: DecisionOptions) -> Guard {
    Guard {
        required: required.into(),
        options,
    }
}

/// Build a guard that only lets admin roles through.
#[must_use]
pub const fn require_admin() -> AdminGuard {
    AdminGuard
}

/// Resolve the caller for `identity`.
///
/// No identity is an authentication failure and never reaches the store.
async fn resolve_caller(
    state: &AppState,
    identity: Option<CallerIdentity>,
) -> Result<Caller, GuardError> {
    let CallerIdentity(user_id) = identity.ok_or(GuardError::AuthenticationRequired)?;

    match state.callers.lookup(user_id).await {
        Ok(Some(caller)) => Ok(caller),
        Ok(None) => {
            warn!(user_id = %user_id, "Identity has no caller record");
            Err(GuardError::CallerNotFound)
        }
        Err(e) => Err(GuardError::internal(e, state.config.expose_error_detail())),
    }
}

/// Decision point for a requirement set.
#[derive(Debug, Clone)]
pub struct Guard {
    required: RequirementSet,
    options: DecisionOptions,
}

impl Guard {
    #[must_use]
    pub const fn required(&self) -> &RequirementSet {
        &self.required
    }

    #[must_use]
    pub const fn options(&self) -> &DecisionOptions {
        &self.options
    }

    /// Run the decision for one request.
    ///
    /// `target` is the resource token taken from the request, compared with
    /// the caller id when the owner bypass is enabled.
    #[tracing::instrument(skip_all, fields(resource = ?self.options.resource))]
    pub async fn check(
        &self,
        state: &AppState,
        identity: Option<CallerIdentity>,
        target: Option<&str>,
    ) -> Result<GrantContext, GuardError> {
        let caller = resolve_caller(state, identity).await?;
        let table = state.roles.snapshot();

        match evaluate(&table, &caller, &self.required, &self.options, target) {
            Verdict::Allow(basis) => {
                debug!(user_id = %caller.id, role = %caller.role, ?basis, "Access granted");
                Ok(GrantContext {
                    user_id: caller.id,
                    email: caller.email,
                    role: caller.role,
                    permissions: self.required.clone(),
                    resource: self.options.resource.as_deref().map(str::to_string),
                    basis,
                })
            }
            Verdict::Deny => {
                warn!(
                    user_id = %caller.id,
                    role = %caller.role,
                    required = ?self.required,
                    "Access denied"
                );
                Err(GuardError::PermissionDenied {
                    required: self.required.clone(),
                    resource: self.options.resource.as_deref().map(str::to_string),
                })
            }
        }
    }

    /// Route parameter named by the options, when ownership can matter.
    async fn target(&self, parts: &mut Parts) -> Option<String> {
        if !self.options.owner_bypass_enabled() {
            return None;
        }
        let params = RawPathParams::from_request_parts(parts, &()).await.ok()?;
        params
            .iter()
            .find(|(name, _)| *name == self.options.target_param)
            .map(|(_, value)| value.to_string())
    }

    /// Adapt the guard to `axum::middleware::from_fn`.
    ///
    /// On success the [`GrantContext`] is added to the request extensions.
    pub fn into_middleware(
        self,
        state: AppState,
    ) -> impl Fn(Request, Next) -> GuardFuture + Clone + Send + Sync + 'static {
        move |request: Request, next: Next| {
            let guard = self.clone();
            let state = state.clone();
            Box::pin(async move {
                let (mut parts, body) = request.into_parts();
                let identity = parts.extensions.get::<CallerIdentity>().copied();
                let target = guard.target(&mut parts).await;

                match guard.check(&state, identity, target.as_deref()).await {
                    Ok(grant) => {
                        parts.extensions.insert(grant);
                        next.run(Request::from_parts(parts, body)).await
                    }
                    Err(e) => e.into_response(),
                }
            })
        }
    }
}

/// Decision point that only admits admin roles.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminGuard;

impl AdminGuard {
    #[tracing::instrument(skip_all)]
    pub async fn check(
        &self,
        state: &AppState,
        identity: Option<CallerIdentity>,
    ) -> Result<GrantContext, GuardError> {
        let caller = resolve_caller(state, identity).await?;

        if !caller.role.is_admin() {
            warn!(user_id = %caller.id, role = %caller.role, "Admin access denied");
            return Err(GuardError::AdminRequired);
        }

        Ok(GrantContext {
            user_id: caller.id,
            email: caller.email,
            role: caller.role,
            permissions: RequirementSet::empty(),
            resource: None,
            basis: Basis::AdminRole,
        })
    }

    /// Adapt the guard to `axum::middleware::from_fn`.
    pub fn into_middleware(
        self,
        state: AppState,
    ) -> impl Fn(Request, Next) -> GuardFuture + Clone + Send + Sync + 'static {
        move |mut request: Request, next: Next| {
            let state = state.clone();
            Box::pin(async move {
                let identity = request.extensions().get::<CallerIdentity>().copied();
                match self.check(&state, identity).await {
                    Ok(grant) => {
                        request.extensions_mut().insert(grant);
                        next.run(request).await
                    }
                    Err(e) => e.into_response(),
                }
            })
        }
    }
}
