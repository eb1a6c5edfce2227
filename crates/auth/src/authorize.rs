use serde::Serialize;
use thiserror::Error;

use storefront_core::UserId;

use crate::Role;

/// A resolved, authenticated actor.
///
/// Construction is intentionally decoupled from storage and transport: the
/// service layer derives this from a verified token plus the user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

/// Action requested against an owned resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Mutate,
}

/// Denial carries the attempted action but a deliberately uniform reason:
/// callers cannot learn from the error whether the resource exists.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not permitted: you do not own this resource")]
    NotOwner(Action),
}

/// Authorize `actor` to perform `action` on a resource owned by `owner`.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
///
/// Mutations require ownership or the administrator role. Reads are open to
/// every authenticated actor; anonymous reads are a routing-layer decision
/// outside this crate.
pub fn authorize(actor: &Actor, owner: UserId, action: Action) -> Result<(), AuthzError> {
    match action {
        Action::Read => Ok(()),
        Action::Mutate => {
            if actor.role.is_administrator() || actor.id == owner {
                Ok(())
            } else {
                Err(AuthzError::NotOwner(action))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(id: UserId) -> Actor {
        Actor {
            id,
            role: Role::Standard,
        }
    }

    #[test]
    fn owner_may_mutate() {
        let owner = UserId::new();
        assert!(authorize(&standard(owner), owner, Action::Mutate).is_ok());
    }

    #[test]
    fn non_owner_may_not_mutate() {
        let actor = standard(UserId::new());
        let err = authorize(&actor, UserId::new(), Action::Mutate).unwrap_err();
        assert_eq!(err, AuthzError::NotOwner(Action::Mutate));
    }

    #[test]
    fn administrator_may_mutate_anything() {
        let admin = Actor {
            id: UserId::new(),
            role: Role::Administrator,
        };
        assert!(authorize(&admin, UserId::new(), Action::Mutate).is_ok());
    }

    #[test]
    fn reads_are_open_to_any_authenticated_actor() {
        let actor = standard(UserId::new());
        assert!(authorize(&actor, UserId::new(), Action::Read).is_ok());
    }

    #[test]
    fn denial_reason_is_uniform() {
        // Same owner id known vs unknown to the caller: identical error.
        let actor = standard(UserId::new());
        let a = authorize(&actor, UserId::new(), Action::Mutate).unwrap_err();
        let b = authorize(&actor, UserId::new(), Action::Mutate).unwrap_err();
        assert_eq!(a.to_string(), b.to_string());
    }
}
