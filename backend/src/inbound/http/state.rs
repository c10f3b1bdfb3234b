//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CatsCommand, CatsQuery, LoginService, UsersCommand, UsersQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub cats: Arc<dyn CatsQuery>,
    pub cats_command: Arc<dyn CatsCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    pub login: Arc<dyn LoginService>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub cats: Arc<dyn CatsQuery>,
    pub cats_command: Arc<dyn CatsCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    pub login: Arc<dyn LoginService>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::{CatService, UserService};
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use backend::outbound::memory::{InMemoryCatRepository, InMemoryUserRepository};
    /// use backend::outbound::password::BcryptPasswordHasher;
    ///
    /// let users_repo = Arc::new(InMemoryUserRepository::default());
    /// let hasher = Arc::new(BcryptPasswordHasher::new(4).expect("cost in range"));
    /// let cats = Arc::new(CatService::new(
    ///     Arc::new(InMemoryCatRepository::default()),
    ///     users_repo.clone(),
    /// ));
    /// let users = Arc::new(UserService::new(users_repo, hasher));
    /// let state = HttpState::new(HttpStatePorts {
    ///     cats: cats.clone(),
    ///     cats_command: cats,
    ///     users: users.clone(),
    ///     users_command: users.clone(),
    ///     login: users,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            cats,
            cats_command,
            users,
            users_command,
            login,
        } = ports;
        Self {
            cats,
            cats_command,
            users,
            users_command,
            login,
        }
    }
}
