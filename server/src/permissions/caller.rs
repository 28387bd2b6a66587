//! Caller record and requirement sets.

use std::collections::BTreeSet;

use serde::Serialize;
use uuid::Uuid;
use warden_common::{Permission, Role};

/// Snapshot of the authenticated user, loaded once per guarded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    /// Grants assigned to this user directly, independent of role.
    /// `None` when the user has none or the stored value was unusable.
    pub explicit_permissions: Option<BTreeSet<Permission>>,
}

/// Permissions a decision point demands. All of them must be held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequirementSet(BTreeSet<Permission>);

impl RequirementSet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeSet::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when `granted` holds every required permission.
    #[must_use]
    pub fn is_subset_of(&self, granted: &BTreeSet<Permission>) -> bool {
        self.0.is_subset(granted)
    }
}

impl<'a> IntoIterator for &'a RequirementSet {
    type Item = &'a Permission;
    type IntoIter = std::collections::btree_set::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Permission> for RequirementSet {
    fn from(permission: Permission) -> Self {
        Self(BTreeSet::from([permission]))
    }
}

impl<const N: usize> From<[Permission; N]> for RequirementSet {
    fn from(permissions: [Permission; N]) -> Self {
        Self(permissions.into_iter().collect())
    }
}

impl From<&[Permission]> for RequirementSet {
    fn from(permissions: &[Permission]) -> Self {
        Self(permissions.iter().copied().collect())
    }
}

impl From<Vec<Permission>> for RequirementSet {
    fn from(permissions: Vec<Permission>) -> Self {
        Self(permissions.into_iter().collect())
    }
}

impl FromIterator<Permission> for RequirementSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
