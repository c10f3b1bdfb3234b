//! Port abstraction for cat persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{BoundingBox, Cat, CatChanges, CatId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by cat repository adapters.
    pub enum CatPersistenceError {
        /// Repository connection could not be established.
        Connection { message } => "cat repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message } => "cat repository query failed: {message}",
    }
}

/// Selection applied by [`CatRepository::find`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatFilter {
    /// Every stored cat.
    All,
    /// Cats whose owner is the given user.
    OwnedBy(UserId),
    /// Cats located inside the box, boundary included.
    WithinBox(BoundingBox),
}

impl CatFilter {
    /// Whether `cat` satisfies the filter.
    pub fn matches(&self, cat: &Cat) -> bool {
        match self {
            Self::All => true,
            Self::OwnedBy(owner) => cat.owner == *owner,
            Self::WithinBox(area) => area.contains(&cat.location),
        }
    }
}

/// Driven port over the cat store.
///
/// The `find_*_and_*` methods perform lookup and mutation as a single store
/// operation and return the record as it was after an update or before a
/// delete; `None` means nothing matched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatRepository: Send + Sync {
    /// Fetch a cat by identifier.
    async fn find_by_id(&self, id: &CatId) -> Result<Option<Cat>, CatPersistenceError>;

    /// List cats matching the filter, ordered by name then id.
    async fn find(&self, filter: &CatFilter) -> Result<Vec<Cat>, CatPersistenceError>;

    /// Insert a new cat.
    async fn create(&self, cat: &Cat) -> Result<(), CatPersistenceError>;

    /// Apply `changes` to the cat with `id`.
    async fn find_by_id_and_update(
        &self,
        id: &CatId,
        changes: &CatChanges,
    ) -> Result<Option<Cat>, CatPersistenceError>;

    /// Delete the cat with `id` only when `owner` owns it.
    async fn find_one_and_delete(
        &self,
        id: &CatId,
        owner: &UserId,
    ) -> Result<Option<Cat>, CatPersistenceError>;

    /// Delete the cat with `id` regardless of owner.
    async fn find_by_id_and_delete(&self, id: &CatId) -> Result<Option<Cat>, CatPersistenceError>;
}
