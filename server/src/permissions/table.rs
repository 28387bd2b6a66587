//! Active role table.
//!
//! Evaluations read one immutable snapshot. Reloading swaps the whole table,
//! so no evaluation ever sees a partially edited mapping.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::{Context, Result};
use tracing::info;
use warden_common::RolePermissionTable;

/// Shared handle to the role table currently in force.
#[derive(Debug)]
pub struct RoleTableHandle {
    current: RwLock<Arc<RolePermissionTable>>,
}

impl RoleTableHandle {
    #[must_use]
    pub fn new(table: RolePermissionTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// The table to use for one evaluation.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RolePermissionTable> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Install `table`, returning the one it replaced.
    pub fn replace(&self, table: RolePermissionTable) -> Arc<RolePermissionTable> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, Arc::new(table))
    }
}

impl Default for RoleTableHandle {
    fn default() -> Self {
        Self::new(RolePermissionTable::default())
    }
}

/// Load an operator supplied table from a JSON file.
pub fn load_role_table(path: &Path) -> Result<RolePermissionTable> {
    let document = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read role table {}", path.display()))?;
    let table = RolePermissionTable::from_json(&document)
        .with_context(|| format!("Invalid role table {}", path.display()))?;

    info!(path = %path.display(), "Loaded role table");
    Ok(table)
}
