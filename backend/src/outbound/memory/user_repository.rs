//! `UserRepository` over a mutex-guarded map.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, User, UserChanges, UserId};

/// Process-local user store with unique emails.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

type Users = HashMap<UserId, User>;

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Users>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

fn email_taken(users: &Users, email: &Email, except: Option<&UserId>) -> bool {
    users
        .values()
        .any(|user| user.email() == email && Some(user.id()) != except)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.lock()?;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let users = self.lock()?;
        Ok(users.values().find(|user| user.email() == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.lock()?;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.user_name().as_ref().cmp(b.user_name().as_ref()));
        Ok(all)
    }

    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.lock()?;
        if email_taken(&users, user.email(), None) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id_and_update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut users = self.lock()?;
        if let Some(email) = &changes.email {
            if email_taken(&users, email, Some(id)) {
                return Err(UserPersistenceError::duplicate_email(email.as_ref()));
            }
        }
        Ok(users.get_mut(id).map(|user| {
            user.apply(changes);
            user.clone()
        }))
    }

    async fn find_by_id_and_delete(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.remove(id))
    }
}
