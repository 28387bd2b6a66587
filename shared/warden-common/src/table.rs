//! Role to permission mapping.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Serialize, Serializer};

use crate::error::TableError;
use crate::permission::Permission;
use crate::role::Role;

/// Wildcard entry accepted by [`RolePermissionTable::from_json`].
pub const WILDCARD: &str = "*";

static NO_GRANT: RoleGrant = RoleGrant::Explicit(BTreeSet::new());

/// What a role is granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleGrant {
    /// Every permission, including ones added to the catalog later.
    All,
    Explicit(BTreeSet<Permission>),
}

impl RoleGrant {
    #[must_use]
    pub fn grants(&self, permission: Permission) -> bool {
        match self {
            Self::All => true,
            Self::Explicit(set) => set.contains(&permission),
        }
    }

    /// True when every permission in `required` is granted.
    pub fn covers<'a, I>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = &'a Permission>,
    {
        match self {
            Self::All => true,
            Self::Explicit(set) => required.into_iter().all(|p| set.contains(p)),
        }
    }
}

impl Serialize for RoleGrant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => [WILDCARD].serialize(serializer),
            Self::Explicit(set) => set.serialize(serializer),
        }
    }
}

/// Immutable mapping from role to granted permissions.
///
/// Lookups for a role with no entry yield an empty grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RolePermissionTable {
    grants: HashMap<Role, RoleGrant>,
}

impl RolePermissionTable {
    #[must_use]
    pub fn new(grants: HashMap<Role, RoleGrant>) -> Self {
        Self { grants }
    }

    /// The grant for `role`; an empty grant when the role has no entry.
    #[must_use]
    pub fn grant_for(&self, role: Role) -> &RoleGrant {
        self.grants.get(&role).unwrap_or(&NO_GRANT)
    }

    /// Load a table from a JSON object of role name to identifier array.
    ///
    /// An array containing `"*"` grants everything. Known roles missing from
    /// the document are granted nothing.
    ///
    /// ```
    /// use warden_common::{Permission, Role, RolePermissionTable};
    ///
    /// let table = RolePermissionTable::from_json(
    ///     r#"{ "user": ["read:own"], "admin": ["*"] }"#,
    /// ).unwrap();
    /// assert!(table.grant_for(Role::User).grants(Permission::ReadOwn));
    /// assert!(table.grant_for(Role::Admin).grants(Permission::AssignRoles));
    /// ```
    pub fn from_json(document: &str) -> Result<Self, TableError> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(document)?;

        let mut grants: HashMap<Role, RoleGrant> = Role::known()
            .iter()
            .map(|role| (*role, RoleGrant::Explicit(BTreeSet::new())))
            .collect();

        for (name, entries) in raw {
            let role = Role::parse(&name);
            if role == Role::Unknown {
                return Err(TableError::UnknownRole(name));
            }

            let grant = if entries.iter().any(|e| e == WILDCARD) {
                RoleGrant::All
            } else {
                let set = entries
                    .iter()
                    .map(|e| e.parse::<Permission>())
                    .collect::<Result<BTreeSet<_>, _>>()
                    .map_err(|source| TableError::UnknownPermission {
                        role: name.clone(),
                        source,
                    })?;
                RoleGrant::Explicit(set)
            };
            grants.insert(role, grant);
        }

        Ok(Self { grants })
    }
}

impl Default for RolePermissionTable {
    fn default() -> Self {
        use Permission::{
            CreateProducts, DeleteProducts, ReadAll, ReadOrders, ReadOwn, ReadProducts,
            UpdateOrders, UpdateOwn, UpdateProducts,
        };

        let user = [ReadOwn, UpdateOwn];
        let moderator = [ReadOwn, UpdateOwn, ReadProducts, CreateProducts, ReadOrders];
        let manager = [
            ReadOwn,
            UpdateOwn,
            ReadProducts,
            CreateProducts,
            UpdateProducts,
            DeleteProducts,
            ReadOrders,
            UpdateOrders,
            ReadAll,
        ];

        let grants = HashMap::from([
            (Role::User, RoleGrant::Explicit(user.into_iter().collect())),
            (Role::Moderator, RoleGrant::Explicit(moderator.into_iter().collect())),
            (Role::Manager, RoleGrant::Explicit(manager.into_iter().collect())),
            (Role::Admin, RoleGrant::All),
            (Role::Superadmin, RoleGrant::All),
        ]);

        Self { grants }
    }
}
