//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::domain::GeoPoint;
use backend::inbound::http::session_config::SessionSettings;
use backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) default_location: GeoPoint,
    pub(crate) password_hash_cost: u32,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration backed by in-memory stores.
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        default_location: GeoPoint,
        password_hash_cost: u32,
    ) -> Self {
        Self {
            session,
            bind_addr,
            default_location,
            password_hash_cost,
            db_pool: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, cats and users are stored in PostgreSQL instead of
    /// process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
