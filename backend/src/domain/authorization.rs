//! Access decisions for mutations of owned cat records.
//!
//! [`authorize`] is pure: it inspects the principal and the action and either
//! returns the [`Scope`] the mutation must be restricted to, or an
//! [`AccessDenied`] reason. Services apply the scope when they call the
//! repository so that ownership and mutation happen in one store operation.
//!
//! | action                    | allowed when                                |
//! |---------------------------|---------------------------------------------|
//! | delete, owner entry point | always, scoped to the principal's cats      |
//! | delete, admin entry point | principal is an admin                       |
//! | update, owner entry point | request body echoes the principal's id      |
//! | update, admin entry point | principal is an admin                       |
//!
//! Every action requires a principal.

use std::fmt;

use tracing::debug;

use super::{Error, Principal, Role, UserId};

/// Which entry point a cat mutation arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The caller acts on cats they own.
    Owner,
    /// The caller acts with admin rights on any cat.
    Admin,
}

/// A guarded mutation of a cat record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatAction<'a> {
    /// Update a cat. `asserted_owner` is the `owner` value the caller echoed
    /// in the request body.
    Update {
        access: Access,
        asserted_owner: Option<&'a UserId>,
    },
    /// Delete a cat.
    Delete { access: Access },
}

impl fmt::Display for CatAction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update { access: Access::Owner, .. } => f.write_str("update_cat_owned"),
            Self::Update { access: Access::Admin, .. } => f.write_str("update_cat_admin"),
            Self::Delete { access: Access::Owner } => f.write_str("delete_cat_owned"),
            Self::Delete { access: Access::Admin } => f.write_str("delete_cat_admin"),
        }
    }
}

/// Records an allowed mutation may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Any record with the requested id.
    Any,
    /// Only a record with the requested id that is owned by this user.
    OwnedBy(UserId),
}

/// Reason a guarded action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("no principal attached to the request")]
    MissingPrincipal,
    #[error("principal is not the asserted owner")]
    NotOwner,
    #[error("principal lacks the {required} role")]
    RoleMismatch { required: Role },
}

impl From<AccessDenied> for Error {
    fn from(value: AccessDenied) -> Self {
        match value {
            AccessDenied::MissingPrincipal => Error::forbidden("token not valid"),
            AccessDenied::NotOwner | AccessDenied::RoleMismatch { .. } => {
                Error::forbidden("Access restricted")
            }
        }
    }
}

/// Require a principal for an operation that acts as the caller.
///
/// # Examples
/// ```
/// use backend::domain::{require_principal, AccessDenied};
///
/// assert_eq!(require_principal(None), Err(AccessDenied::MissingPrincipal));
/// ```
pub fn require_principal(principal: Option<&Principal>) -> Result<&Principal, AccessDenied> {
    principal.ok_or_else(|| {
        debug!(reason = %AccessDenied::MissingPrincipal, "access denied");
        AccessDenied::MissingPrincipal
    })
}

/// Decide whether `principal` may perform `action`.
///
/// # Examples
/// ```
/// use backend::domain::{authorize, Access, CatAction, Principal, Role, Scope, UserId};
///
/// let principal = Principal::new(UserId::random(), Role::User);
/// let scope = authorize(Some(&principal), CatAction::Delete { access: Access::Owner });
/// assert_eq!(scope, Ok(Scope::OwnedBy(principal.id)));
/// ```
pub fn authorize(principal: Option<&Principal>, action: CatAction<'_>) -> Result<Scope, AccessDenied> {
    let principal = require_principal(principal)?;
    let decision = decide(principal, action);
    match &decision {
        Ok(scope) => debug!(%action, principal = %principal.id, ?scope, "access granted"),
        Err(reason) => debug!(%action, principal = %principal.id, %reason, "access denied"),
    }
    decision
}

fn decide(principal: &Principal, action: CatAction<'_>) -> Result<Scope, AccessDenied> {
    match action {
        CatAction::Delete { access: Access::Owner } => Ok(Scope::OwnedBy(principal.id)),
        CatAction::Update {
            access: Access::Owner,
            asserted_owner,
        } => match asserted_owner {
            // The echoed owner is taken at face value; the stored owner is not
            // re-read before the write.
            Some(owner) if *owner == principal.id => Ok(Scope::Any),
            _ => Err(AccessDenied::NotOwner),
        },
        CatAction::Update {
            access: Access::Admin,
            ..
        }
        | CatAction::Delete {
            access: Access::Admin,
        } => {
            if principal.is_admin() {
                Ok(Scope::Any)
            } else {
                Err(AccessDenied::RoleMismatch {
                    required: Role::Admin,
                })
            }
        }
    }
}
