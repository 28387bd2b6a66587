//! Ownership resolution.

use uuid::Uuid;

use super::caller::Caller;

/// True iff `target` names the caller.
///
/// Both sides are compared as UUIDs, so `"6F9619FF-8B86-D011-B42D-00C04FC964FF"`
/// and its lowercase, braced or unhyphenated spellings all match the same id.
/// A missing or unparsable target is never the caller.
#[must_use]
pub fn is_owner(caller: &Caller, target: Option<&str>) -> bool {
    target
        .and_then(|t| Uuid::try_parse(t).ok())
        .is_some_and(|t| t == caller.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_common::Role;

    fn caller(id: Uuid) -> Caller {
        Caller {
            id,
            email: "owner@example.com".into(),
            role: Role::User,
            explicit_permissions: None,
        }
    }

    #[test]
    fn test_matching_target() {
        let id = Uuid::new_v4();
        assert!(is_owner(&caller(id), Some(&id.to_string())));
    }

    #[test]
    fn test_textual_forms_normalize() {
        let id = Uuid::new_v4();
        let caller = caller(id);
        assert!(is_owner(&caller, Some(&id.to_string().to_uppercase())));
        assert!(is_owner(&caller, Some(&id.simple().to_string())));
        assert!(is_owner(&caller, Some(&id.braced().to_string())));
    }

    #[test]
    fn test_other_target() {
        let caller = caller(Uuid::new_v4());
        assert!(!is_owner(&caller, Some(&Uuid::new_v4().to_string())));
    }

    #[test]
    fn test_missing_or_garbage_target() {
        let caller = caller(Uuid::new_v4());
        assert!(!is_owner(&caller, None));
        assert!(!is_owner(&caller, Some("")));
        assert!(!is_owner(&caller, Some("me")));
    }
}
