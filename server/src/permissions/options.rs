//! Decision point options.

use std::borrow::Cow;

/// Resource label that marks a self-scoped endpoint.
pub const OWN_RESOURCE: &str = "own";

/// Path parameter holding the target user id, unless overridden.
pub const DEFAULT_TARGET_PARAM: &str = "id";

/// Per-guard configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOptions {
    /// Category of resource being accessed, reported on denial.
    pub resource: Option<Cow<'static, str>>,
    /// Let the subject of a self-scoped request through without grants.
    pub allow_owner: bool,
    /// Route parameter compared against the caller id.
    pub target_param: Cow<'static, str>,
}

impl Default for DecisionOptions {
    fn default() -> Self {
        Self {
            resource: None,
            allow_owner: false,
            target_param: Cow::Borrowed(DEFAULT_TARGET_PARAM),
        }
    }
}

impl DecisionOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn resource(mut self, resource: impl Into<Cow<'static, str>>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    #[must_use]
    pub const fn allow_owner(mut self, allow: bool) -> Self {
        self.allow_owner = allow;
        self
    }

    #[must_use]
    pub fn target_param(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.target_param = name.into();
        self
    }

    /// Shorthand for `resource("own")` with owners allowed.
    #[must_use]
    pub fn owner_scoped() -> Self {
        Self::new().resource(OWN_RESOURCE).allow_owner(true)
    }

    /// Ownership is only consulted for owner-allowed, self-scoped resources.
    #[must_use]
    pub fn owner_bypass_enabled(&self) -> bool {
        self.allow_owner && self.resource.as_deref() == Some(OWN_RESOURCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DecisionOptions::default();
        assert_eq!(options.resource, None);
        assert!(!options.allow_owner);
        assert_eq!(options.target_param, "id");
        assert!(!options.owner_bypass_enabled());
    }

    #[test]
    fn test_owner_bypass_needs_both_flags() {
        assert!(DecisionOptions::owner_scoped().owner_bypass_enabled());
        assert!(!DecisionOptions::new().resource("own").owner_bypass_enabled());
        assert!(!DecisionOptions::new()
            .resource("products")
            .allow_owner(true)
            .owner_bypass_enabled());
        assert!(!DecisionOptions::new().allow_owner(true).owner_bypass_enabled());
    }

    #[test]
    fn test_target_param_override() {
        let options = DecisionOptions::owner_scoped().target_param("user_id");
        assert_eq!(options.target_param, "user_id");
    }
}
