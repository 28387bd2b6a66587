//! Permission decisions.
//!
//! Catalog and role table live in `warden_common`; this module resolves the
//! caller, evaluates requirements against them and adapts the result to axum:
//! - [`evaluate`]: the pure allow/deny decision
//! - [`guard::require`] / [`guard::require_admin`]: configured decision points
//! - [`GrantContext`]: what an allowed request carries to its handler

mod caller;
mod context;
mod error;
mod evaluator;
pub mod guard;
mod options;
mod ownership;
mod table;

pub use caller::{Caller, RequirementSet};
pub use context::GrantContext;
pub use error::GuardError;
pub use evaluator::{evaluate, Basis, Verdict};
pub use guard::{require, require_admin, AdminGuard, Guard};
pub use options::{DecisionOptions, DEFAULT_TARGET_PARAM, OWN_RESOURCE};
pub use ownership::is_owner;
pub use table::{load_role_table, RoleTableHandle};
pub use warden_common::{Permission, Role, RoleGrant, RolePermissionTable};
