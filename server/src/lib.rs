//! Warden Server
//!
//! Decides whether an authenticated caller may perform a guarded operation,
//! using a fixed permission catalog, role grants, per-user grants and an
//! ownership shortcut for self-scoped resources.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod permissions;
