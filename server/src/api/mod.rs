//! API Router and Application State
//!
//! Central routing configuration and shared state.

mod handlers;

use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::establish_identity;
use crate::config::Config;
use crate::db::CallerStore;
use crate::permissions::{guard, DecisionOptions, Permission, RoleTableHandle};

pub use handlers::PermissionInfo;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Source of caller records
    pub callers: Arc<dyn CallerStore>,
    /// Role table in force; replaced wholesale on reload
    pub roles: Arc<RoleTableHandle>,
    /// Server configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(callers: Arc<dyn CallerStore>, roles: RoleTableHandle, config: Config) -> Self {
        Self {
            callers,
            roles: Arc::new(roles),
            config: Arc::new(config),
        }
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    // Users may always reach their own record; anyone else needs the :all grant
    let users = get(handlers::get_user)
        .route_layer(from_fn(
            guard::require(Permission::ReadAll, DecisionOptions::owner_scoped())
                .into_middleware(state.clone()),
        ))
        .merge(patch(handlers::update_user).route_layer(from_fn(
            guard::require(Permission::UpdateAll, DecisionOptions::owner_scoped())
                .into_middleware(state.clone()),
        )));

    let products = post(handlers::create_product).route_layer(from_fn(
        guard::require(
            Permission::CreateProducts,
            DecisionOptions::new().resource("products"),
        )
        .into_middleware(state.clone()),
    ));

    let orders = get(handlers::list_orders).route_layer(from_fn(
        guard::require(Permission::ReadOrders, DecisionOptions::new().resource("orders"))
            .into_middleware(state.clone()),
    ));

    let order = put(handlers::update_order).route_layer(from_fn(
        guard::require(
            [Permission::ReadOrders, Permission::UpdateOrders],
            DecisionOptions::new().resource("orders"),
        )
        .into_middleware(state.clone()),
    ));

    let roles = get(handlers::list_roles)
        .route_layer(from_fn(guard::require_admin().into_middleware(state.clone())));

    // Identity is established for every guarded route before its guard runs
    let api_routes = Router::new()
        .route("/api/users/{id}", users)
        .route("/api/products", products)
        .route("/api/orders", orders)
        .route("/api/orders/{id}", order)
        .route("/api/admin/roles", roles)
        .layer(from_fn_with_state(state.clone(), establish_identity));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/permissions", get(handlers::list_permissions))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
