//! Port abstraction for one-way password hashing.
use async_trait::async_trait;

use crate::domain::{PasswordHash, PlainPassword};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing failed, for example because of an invalid cost.
        Hash { message } => "password hashing failed: {message}",
        /// A stored hash could not be decoded.
        MalformedHash { message } => "stored password hash is malformed: {message}",
    }
}

/// Driven port that hashes and verifies passwords.
///
/// Adapters are configured with their work factor at construction; there is
/// no process-wide hashing state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted one-way hash of `password`.
    async fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a stored hash.
    async fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError>;
}
