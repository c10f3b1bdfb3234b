//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`CatRepository`, `UserRepository`, `PasswordHasher`) are
//! implemented by outbound adapters. Driving ports (`CatsQuery`,
//! `CatsCommand`, `UsersQuery`, `UsersCommand`, `LoginService`) are
//! implemented by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod cat_repository;
mod cats_command;
mod cats_query;
mod login_service;
mod password_hasher;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use cat_repository::MockCatRepository;
pub use cat_repository::{CatFilter, CatPersistenceError, CatRepository};
#[cfg(test)]
pub use cats_command::MockCatsCommand;
pub use cats_command::{CatsCommand, CreateCatRequest, DeleteCatRequest, UpdateCatRequest};
#[cfg(test)]
pub use cats_query::MockCatsQuery;
pub use cats_query::CatsQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{RegisterUserRequest, UpdateCurrentUserRequest, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;

#[cfg(test)]
mod tests;
