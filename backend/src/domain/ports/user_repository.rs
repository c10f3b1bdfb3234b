//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, User, UserChanges, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail { email } => "email already registered: {email}",
    }
}

/// Driven port over the user store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch every user whose id is in `ids`; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by login email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// List all users.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Insert a new user.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Apply `changes` to the user with `id`, returning the updated record.
    async fn find_by_id_and_update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Delete the user with `id`, returning the removed record.
    async fn find_by_id_and_delete(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
