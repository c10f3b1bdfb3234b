//! Driving port for cat read use-cases.

use async_trait::async_trait;

use crate::domain::{BoundingBox, Cat, CatId, CatView, Error, Principal};

/// Domain use-case port for reading cats.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatsQuery: Send + Sync {
    /// Fetch one cat with its owner resolved.
    async fn get(&self, id: &CatId) -> Result<CatView, Error>;

    /// List every cat with owners resolved.
    async fn list(&self) -> Result<Vec<CatView>, Error>;

    /// List the principal's own cats with owners resolved.
    async fn list_by_owner(&self, principal: Option<Principal>) -> Result<Vec<CatView>, Error>;

    /// List cats located inside `area`. Owners are left as ids.
    async fn list_within(&self, area: BoundingBox) -> Result<Vec<Cat>, Error>;
}
