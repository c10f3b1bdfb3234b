//! Driving port for account registration and self-service changes.

use async_trait::async_trait;

use crate::domain::{Email, Error, PlainPassword, Principal, Role, UserName, UserView};

/// Request to register a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub user_name: UserName,
    pub email: Email,
    pub password: PlainPassword,
    /// Role requested by the client; `None` means the default role.
    pub role: Option<Role>,
}

/// Partial update of the principal's own account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCurrentUserRequest {
    pub principal: Option<Principal>,
    pub user_name: Option<UserName>,
    pub email: Option<Email>,
    /// Re-hashed before storage when present.
    pub password: Option<PlainPassword>,
}

/// Domain use-case port for changing accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register an account and return its restricted projection.
    async fn register(&self, request: RegisterUserRequest) -> Result<UserView, Error>;

    /// Update the principal's own account.
    async fn update_current(&self, request: UpdateCurrentUserRequest) -> Result<UserView, Error>;

    /// Delete the principal's own account, returning the removed projection.
    async fn delete_current(&self, principal: Option<Principal>) -> Result<UserView, Error>;
}
