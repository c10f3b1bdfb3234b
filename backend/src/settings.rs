//! Server configuration loaded via OrthoConfig.
//!
//! Values come from `WHISKERS_*` environment variables, matching CLI flags
//! and configuration files, in OrthoConfig's usual precedence.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{GeoError, GeoPoint};

/// Address bound when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// bcrypt work factor used when none is configured.
pub const DEFAULT_PASSWORD_HASH_COST: u32 = 12;
/// Fallback request longitude (Helsinki).
pub const DEFAULT_LNG: f64 = 24.9384;
/// Fallback request latitude (Helsinki).
pub const DEFAULT_LAT: f64 = 60.1699;

/// Configuration values for the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WHISKERS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL. When absent the server keeps data in memory.
    pub database_url: Option<String>,
    /// bcrypt cost for new password hashes.
    pub password_hash_cost: Option<u32>,
    /// Longitude used when a request carries no coordinates.
    pub default_lng: Option<f64>,
    /// Latitude used when a request carries no coordinates.
    pub default_lat: Option<f64>,
    /// File holding the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Allow a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`. Defaults to `true`.
    pub cookie_secure: Option<bool>,
}

impl ServerSettings {
    /// Configured bind address or [`DEFAULT_BIND_ADDR`].
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)))
    }

    /// Configured bcrypt cost or [`DEFAULT_PASSWORD_HASH_COST`].
    pub fn password_hash_cost(&self) -> u32 {
        self.password_hash_cost
            .unwrap_or(DEFAULT_PASSWORD_HASH_COST)
    }

    /// Whether session cookies carry `Secure`; on unless explicitly disabled.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Database URL with blank values treated as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Location stamped on cats when a request carries no coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] when the configured pair is out of range.
    pub fn default_location(&self) -> Result<GeoPoint, GeoError> {
        GeoPoint::new(
            self.default_lng.unwrap_or(DEFAULT_LNG),
            self.default_lat.unwrap_or(DEFAULT_LAT),
        )
    }
}
