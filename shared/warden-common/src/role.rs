//! Role names.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Role assigned to a user account.
///
/// Role names come from storage as free text, so parsing never fails: a name
/// outside the known set becomes [`Role::Unknown`], which is granted nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Role {
    #[default]
    User,
    Moderator,
    Manager,
    Admin,
    Superadmin,
    Unknown,
}

impl Role {
    /// Parse a stored role name. Matching is exact.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "user" => Self::User,
            "moderator" => Self::Moderator,
            "manager" => Self::Manager,
            "admin" => Self::Admin,
            "superadmin" => Self::Superadmin,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Moderator => "moderator",
            Self::Manager => "manager",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
            Self::Unknown => "unknown",
        }
    }

    /// Roles that bypass every permission check.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }

    /// The closed set of assignable roles.
    #[must_use]
    pub const fn known() -> &'static [Self] {
        &[
            Self::User,
            Self::Moderator,
            Self::Manager,
            Self::Admin,
            Self::Superadmin,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}
