//! Guarded resource handlers.
//!
//! Each handler echoes the grant its guard produced, so clients can see which
//! rule admitted them.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::json;
use warden_common::{Action, Domain, Permission};

use super::AppState;
use crate::permissions::GrantContext;

/// Catalog entry returned by `GET /api/permissions`.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionInfo {
    pub id: Permission,
    pub action: Action,
    pub domain: Domain,
}

impl From<Permission> for PermissionInfo {
    fn from(id: Permission) -> Self {
        Self {
            id,
            action: id.action(),
            domain: id.domain(),
        }
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// GET /api/permissions
pub async fn list_permissions() -> Json<Vec<PermissionInfo>> {
    Json(Permission::all().iter().copied().map(PermissionInfo::from).collect())
}

/// GET /api/users/{id}
pub async fn get_user(Path(id): Path<String>, grant: GrantContext) -> impl IntoResponse {
    Json(json!({ "user_id": id, "grant": grant }))
}

/// PATCH /api/users/{id}
pub async fn update_user(Path(id): Path<String>, grant: GrantContext) -> impl IntoResponse {
    Json(json!({ "user_id": id, "updated": true, "grant": grant }))
}

/// POST /api/products
pub async fn create_product(grant: GrantContext) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        Json(json!({ "created": true, "grant": grant })),
    )
}

/// GET /api/orders
pub async fn list_orders(grant: GrantContext) -> impl IntoResponse {
    Json(json!({ "orders": [], "grant": grant }))
}

/// PUT /api/orders/{id}
pub async fn update_order(Path(id): Path<String>, grant: GrantContext) -> impl IntoResponse {
    Json(json!({ "order_id": id, "updated": true, "grant": grant }))
}

/// GET /api/admin/roles
///
/// Returns the role table currently in force.
pub async fn list_roles(State(state): State<AppState>, grant: GrantContext) -> impl IntoResponse {
    let table = state.roles.snapshot();
    Json(json!({ "roles": &*table, "grant": grant }))
}
