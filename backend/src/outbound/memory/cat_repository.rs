//! `CatRepository` over a mutex-guarded map.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{CatFilter, CatPersistenceError, CatRepository};
use crate::domain::{Cat, CatChanges, CatId, UserId};

/// Process-local cat store.
#[derive(Debug, Default)]
pub struct InMemoryCatRepository {
    cats: Mutex<HashMap<CatId, Cat>>,
}

impl InMemoryCatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<CatId, Cat>>, CatPersistenceError> {
        self.cats
            .lock()
            .map_err(|_| CatPersistenceError::query("cat store lock poisoned"))
    }
}

#[async_trait]
impl CatRepository for InMemoryCatRepository {
    async fn find_by_id(&self, id: &CatId) -> Result<Option<Cat>, CatPersistenceError> {
        Ok(self.lock()?.get(id).cloned())
    }

    async fn find(&self, filter: &CatFilter) -> Result<Vec<Cat>, CatPersistenceError> {
        let cats = self.lock()?;
        let mut found: Vec<Cat> = cats
            .values()
            .filter(|cat| filter.matches(cat))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.name
                .as_ref()
                .cmp(b.name.as_ref())
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });
        Ok(found)
    }

    async fn create(&self, cat: &Cat) -> Result<(), CatPersistenceError> {
        let mut cats = self.lock()?;
        if cats.contains_key(&cat.id) {
            return Err(CatPersistenceError::query(format!(
                "cat {} already exists",
                cat.id
            )));
        }
        cats.insert(cat.id, cat.clone());
        Ok(())
    }

    async fn find_by_id_and_update(
        &self,
        id: &CatId,
        changes: &CatChanges,
    ) -> Result<Option<Cat>, CatPersistenceError> {
        let mut cats = self.lock()?;
        Ok(cats.get_mut(id).map(|cat| {
            cat.apply(changes);
            cat.clone()
        }))
    }

    async fn find_one_and_delete(
        &self,
        id: &CatId,
        owner: &UserId,
    ) -> Result<Option<Cat>, CatPersistenceError> {
        let mut cats = self.lock()?;
        let owned = cats.get(id).is_some_and(|cat| cat.owner == *owner);
        Ok(if owned { cats.remove(id) } else { None })
    }

    async fn find_by_id_and_delete(&self, id: &CatId) -> Result<Option<Cat>, CatPersistenceError> {
        Ok(self.lock()?.remove(id))
    }
}
