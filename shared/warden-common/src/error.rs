//! Error types for catalog parsing and table loading.

use thiserror::Error;

/// A permission identifier that is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown permission: {0}")]
pub struct UnknownPermission(pub String);

/// Failure to load an operator-supplied role table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The document is not a JSON object of role name to identifier array.
    #[error("Invalid role table document: {0}")]
    Json(#[from] serde_json::Error),

    /// A key does not name a known role.
    #[error("Unknown role in role table: {0}")]
    UnknownRole(String),

    /// An entry is neither a catalog identifier nor the wildcard.
    #[error("Role {role}: {source}")]
    UnknownPermission {
        role: String,
        #[source]
        source: UnknownPermission,
    },
}
