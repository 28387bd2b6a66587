//! Database Queries
//!
//! Runtime queries (no compile-time `DATABASE_URL` required).

use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use super::models::User;

/// Log and return a database error with context.
macro_rules! db_error {
    ($query:expr, $($field:tt)*) => {
        |e| {
            error!(query = $query, $($field)*, error = %e, "Database query failed");
            e
        }
    };
}

/// Find user by ID.
pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT id, email, role, permissions FROM users WHERE id = $1")
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("find_user_by_id", user_id = %id))
}
