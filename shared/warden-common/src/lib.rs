//! Warden Common Library
//!
//! The permission catalog, role names and role table shared by every
//! component that needs to name a required permission.

pub mod error;
pub mod permission;
pub mod role;
pub mod table;

pub use error::{TableError, UnknownPermission};
pub use permission::{Action, Domain, Permission};
pub use role::Role;
pub use table::{RoleGrant, RolePermissionTable};
