//! Builders wiring repositories, services and HTTP state ports.

use std::sync::Arc;

use backend::domain::ports::{
    CatRepository, PasswordHashError, PasswordHasher, UserRepository,
};
use backend::domain::{CatService, UserService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::memory::{InMemoryCatRepository, InMemoryUserRepository};
use backend::outbound::password::BcryptPasswordHasher;
use backend::outbound::persistence::{DieselCatRepository, DieselUserRepository};
use tracing::{info, warn};

use super::ServerConfig;

/// Build HTTP state over PostgreSQL when a pool is configured, otherwise over
/// in-memory stores.
///
/// The returned state is shared by every worker so in-memory data is not
/// partitioned per thread.
pub(super) fn build_http_state(config: &ServerConfig) -> Result<HttpState, PasswordHashError> {
    let hasher = Arc::new(BcryptPasswordHasher::new(config.password_hash_cost)?);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            wire(
                Arc::new(DieselCatRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool.clone())),
                hasher,
            )
        }
        None => {
            warn!("no database configured; data is kept in memory");
            wire(
                Arc::new(InMemoryCatRepository::new()),
                Arc::new(InMemoryUserRepository::new()),
                hasher,
            )
        }
    };
    Ok(state)
}

fn wire<C, U, H>(cats: Arc<C>, users: Arc<U>, hasher: Arc<H>) -> HttpState
where
    C: CatRepository + 'static,
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let cat_service = Arc::new(CatService::new(cats, users.clone()));
    let user_service = Arc::new(UserService::new(users, hasher));
    HttpState::new(HttpStatePorts {
        cats: cat_service.clone(),
        cats_command: cat_service,
        users: user_service.clone(),
        users_command: user_service.clone(),
        login: user_service,
    })
}
