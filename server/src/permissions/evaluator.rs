//! Permission evaluation.
//!
//! Resolution order, first match wins:
//! 1. Admin roles are allowed unconditionally
//! 2. Owner of a self-scoped resource (only when the guard allows owners)
//! 3. Grants assigned to the caller directly
//! 4. Grants of the caller's role
//!
//! Anything else is denied. Evaluation is pure and never fails.

use serde::Serialize;
use warden_common::RolePermissionTable;

use super::caller::{Caller, RequirementSet};
use super::options::DecisionOptions;
use super::ownership::is_owner;

/// Which rule let the caller through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    AdminRole,
    Ownership,
    ExplicitGrant,
    RoleGrant,
}

/// Outcome of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow(Basis),
    Deny,
}

impl Verdict {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }
}

/// Decide whether `caller` satisfies `required`.
///
/// `target` is the resource token from the request (the id in the route),
/// only looked at when `options` enable the owner bypass.
#[must_use]
pub fn evaluate(
    table: &RolePermissionTable,
    caller: &Caller,
    required: &RequirementSet,
    options: &DecisionOptions,
    target: Option<&str>,
) -> Verdict {
    if caller.role.is_admin() {
        return Verdict::Allow(Basis::AdminRole);
    }

    if options.owner_bypass_enabled() && is_owner(caller, target) {
        return Verdict::Allow(Basis::Ownership);
    }

    if caller
        .explicit_permissions
        .as_ref()
        .is_some_and(|granted| required.is_subset_of(granted))
    {
        return Verdict::Allow(Basis::ExplicitGrant);
    }

    if table.grant_for(caller.role).covers(required) {
        return Verdict::Allow(Basis::RoleGrant);
    }

    Verdict::Deny
}
