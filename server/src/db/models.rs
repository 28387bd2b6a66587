//! Database Models

use std::collections::BTreeSet;

use sqlx::FromRow;
use tracing::debug;
use uuid::Uuid;
use warden_common::{Permission, Role};

use crate::permissions::Caller;

/// The columns of a user row a decision needs.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub permissions: Option<serde_json::Value>,
}

impl From<User> for Caller {
    fn from(user: User) -> Self {
        let explicit_permissions = decode_explicit_permissions(user.id, user.permissions);
        Self {
            id: user.id,
            email: user.email,
            role: Role::parse(&user.role),
            explicit_permissions,
        }
    }
}

/// Decode the `permissions` column.
///
/// Anything other than an array of strings means "no explicit grants".
/// Strings outside the catalog are dropped.
pub fn decode_explicit_permissions(
    user_id: Uuid,
    value: Option<serde_json::Value>,
) -> Option<BTreeSet<Permission>> {
    let serde_json::Value::Array(entries) = value? else {
        debug!(user_id = %user_id, "Ignoring non-array explicit permissions");
        return None;
    };

    let mut granted = BTreeSet::new();
    for entry in entries {
        let serde_json::Value::String(name) = entry else {
            debug!(user_id = %user_id, "Ignoring malformed explicit permissions");
            return None;
        };
        match name.parse::<Permission>() {
            Ok(permission) => {
                granted.insert(permission);
            }
            Err(e) => debug!(user_id = %user_id, error = %e, "Skipping explicit permission"),
        }
    }

    Some(granted)
}
