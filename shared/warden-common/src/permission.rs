//! Permission catalog.
//!
//! Every grantable capability has a stable `"<action>:<domain>"` identifier.
//! Identifiers are never reused for a different meaning; new capabilities get
//! new identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::UnknownPermission;

/// Verb half of a permission identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Manage,
    Assign,
}

/// Object half of a permission identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// The caller's own records.
    Own,
    Products,
    Orders,
    /// Every record, regardless of owner.
    All,
    Users,
    Roles,
}

/// A single grantable capability.
///
/// Serializes as its identifier string (`"create:products"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    ReadOwn,
    CreateOwn,
    UpdateOwn,
    DeleteOwn,
    ReadProducts,
    CreateProducts,
    UpdateProducts,
    DeleteProducts,
    ReadOrders,
    CreateOrders,
    UpdateOrders,
    DeleteOrders,
    ReadAll,
    CreateAll,
    UpdateAll,
    DeleteAll,
    /// Administer user accounts.
    ManageUsers,
    /// Change the role assigned to a user.
    AssignRoles,
}

impl Permission {
    /// Returns the stable identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use warden_common::Permission;
    ///
    /// assert_eq!(Permission::CreateProducts.as_str(), "create:products");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReadOwn => "read:own",
            Self::CreateOwn => "create:own",
            Self::UpdateOwn => "update:own",
            Self::DeleteOwn => "delete:own",
            Self::ReadProducts => "read:products",
            Self::CreateProducts => "create:products",
            Self::UpdateProducts => "update:products",
            Self::DeleteProducts => "delete:products",
            Self::ReadOrders => "read:orders",
            Self::CreateOrders => "create:orders",
            Self::UpdateOrders => "update:orders",
            Self::DeleteOrders => "delete:orders",
            Self::ReadAll => "read:all",
            Self::CreateAll => "create:all",
            Self::UpdateAll => "update:all",
            Self::DeleteAll => "delete:all",
            Self::ManageUsers => "manage:users",
            Self::AssignRoles => "assign:roles",
        }
    }

    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::ReadOwn | Self::ReadProducts | Self::ReadOrders | Self::ReadAll => Action::Read,
            Self::CreateOwn | Self::CreateProducts | Self::CreateOrders | Self::CreateAll => {
                Action::Create
            }
            Self::UpdateOwn | Self::UpdateProducts | Self::UpdateOrders | Self::UpdateAll => {
                Action::Update
            }
            Self::DeleteOwn | Self::DeleteProducts | Self::DeleteOrders | Self::DeleteAll => {
                Action::Delete
            }
            Self::ManageUsers => Action::Manage,
            Self::AssignRoles => Action::Assign,
        }
    }

    #[must_use]
    pub const fn domain(&self) -> Domain {
        match self {
            Self::ReadOwn | Self::CreateOwn | Self::UpdateOwn | Self::DeleteOwn => Domain::Own,
            Self::ReadProducts
            | Self::CreateProducts
            | Self::UpdateProducts
            | Self::DeleteProducts => Domain::Products,
            Self::ReadOrders | Self::CreateOrders | Self::UpdateOrders | Self::DeleteOrders => {
                Domain::Orders
            }
            Self::ReadAll | Self::CreateAll | Self::UpdateAll | Self::DeleteAll => Domain::All,
            Self::ManageUsers => Domain::Users,
            Self::AssignRoles => Domain::Roles,
        }
    }

    /// Returns the whole catalog.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ReadOwn,
            Self::CreateOwn,
            Self::UpdateOwn,
            Self::DeleteOwn,
            Self::ReadProducts,
            Self::CreateProducts,
            Self::UpdateProducts,
            Self::DeleteProducts,
            Self::ReadOrders,
            Self::CreateOrders,
            Self::UpdateOrders,
            Self::DeleteOrders,
            Self::ReadAll,
            Self::CreateAll,
            Self::UpdateAll,
            Self::DeleteAll,
            Self::ManageUsers,
            Self::AssignRoles,
        ]
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
