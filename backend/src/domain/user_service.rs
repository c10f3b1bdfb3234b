//! User account services.
//!
//! [`UserService`] implements registration, self-service changes, user
//! queries and login over a [`UserRepository`] and a [`PasswordHasher`].
//! Plaintext passwords only ever reach the hasher.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, RegisterUserRequest,
    UpdateCurrentUserRequest, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{
    AuthenticatedUser, Error, LoginCredentials, PasswordHash, PlainPassword, Principal, Role,
    User, UserChanges, UserId, UserView, require_principal,
};

const USER_NOT_FOUND: &str = "User not found";
const INVALID_CREDENTIALS: &str = "invalid credentials";

pub(crate) fn map_user_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::Connection { message } => {
            error!(%message, "user repository unavailable");
            Error::service_unavailable("User store unavailable")
                .with_details(json!({ "reason": message }))
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::invalid_request("Email already in use")
                .with_details(json!({ "field": "email", "code": "duplicate_email" }))
        }
    }
}

fn map_hash_error(err: PasswordHashError) -> Error {
    error!(error = %err, "password hashing failed");
    Error::internal(format!("password hashing failed: {err}"))
}

/// User service implementing [`UsersQuery`], [`UsersCommand`] and
/// [`LoginService`].
#[derive(Clone)]
pub struct UserService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> UserService<U, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> UserService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, Error> {
        self.hasher.hash(password).await.map_err(map_hash_error)
    }
}

#[async_trait]
impl<U, H> UsersQuery for UserService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn get(&self, id: &UserId) -> Result<UserView, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)?
            .map(|user| user.view())
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn list(&self) -> Result<Vec<UserView>, Error> {
        let users = self.users.list().await.map_err(map_user_persistence_error)?;
        Ok(users.iter().map(User::view).collect())
    }
}

#[async_trait]
impl<U, H> UsersCommand for UserService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<UserView, Error> {
        let RegisterUserRequest {
            user_name,
            email,
            password,
            role,
        } = request;
        if let Some(requested) = role.filter(|role| *role != Role::User) {
            debug!(role = %requested, "registration with elevated role refused");
            return Err(Error::forbidden("Access restricted"));
        }
        let password_hash = self.hash(&password).await?;
        let user = User::new(UserId::random(), user_name, email, password_hash, Role::User);
        self.users
            .create(&user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(user.view())
    }

    async fn update_current(&self, request: UpdateCurrentUserRequest) -> Result<UserView, Error> {
        let principal = require_principal(request.principal.as_ref())?;
        let password_hash = match &request.password {
            Some(password) => Some(self.hash(password).await?),
            None => None,
        };
        let changes = UserChanges {
            user_name: request.user_name,
            email: request.email,
            password_hash,
        };
        let user = self
            .users
            .find_by_id_and_update(&principal.id, &changes)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;
        info!(user_id = %user.id(), "user updated");
        Ok(user.view())
    }

    async fn delete_current(&self, principal: Option<Principal>) -> Result<UserView, Error> {
        let principal = require_principal(principal.as_ref())?;
        let user = self
            .users
            .find_by_id_and_delete(&principal.id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;
        info!(user_id = %user.id(), "user deleted");
        Ok(user.view())
    }
}

#[async_trait]
impl<U, H> LoginService for UserService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_persistence_error)?
        else {
            debug!("login for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hash_error)?;
        if !matches {
            debug!(user_id = %user.id(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        info!(user_id = %user.id(), "user logged in");
        Ok(AuthenticatedUser::from(&user))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
