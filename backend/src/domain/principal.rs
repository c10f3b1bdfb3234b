//! Authenticated identity attached to a request.

use super::{Role, User, UserId, UserView};

/// The identity `{id, role}` a request acts as.
///
/// Principals are resolved per request by the inbound adapter and never
/// persisted by the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Whether the principal may use admin-only operations.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Outcome of a successful login: the principal plus the profile shown back
/// to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub principal: Principal,
    pub profile: UserView,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            principal: Principal::new(*user.id(), user.role()),
            profile: user.view(),
        }
    }
}
