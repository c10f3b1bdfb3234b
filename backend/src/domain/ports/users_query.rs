//! Driving port for user-facing queries.
//!
//! Inbound adapters use this port to fetch restricted user projections
//! without importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserView};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch one user's restricted projection.
    async fn get(&self, id: &UserId) -> Result<UserView, Error>;

    /// List every user's restricted projection.
    async fn list(&self) -> Result<Vec<UserView>, Error>;
}
