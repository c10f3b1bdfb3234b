//! Session cookie configuration.
//!
//! Resolves the signing key and cookie flags from [`ServerSettings`] and
//! builds the cookie-backed session middleware used by the API scope.

use std::path::{Path, PathBuf};

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

use crate::settings::ServerSettings;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";
/// Shortest key accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// Shortest key that can be derived from at all.
const SESSION_KEY_DERIVE_MIN_LEN: usize = 32;
const SESSION_TTL_HOURS: i64 = 2;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to a generated key.
    Debug,
    /// Release builds require a readable key unless explicitly relaxed.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Resolved session settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
}

/// Errors raised while resolving session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// No key file is configured and ephemeral keys are not allowed.
    #[error("session key file is not configured; set WHISKERS_SESSION_KEY_FILE")]
    MissingKeyFile,
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file is too short for the build mode.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Resolve session settings for the given build mode.
///
/// Debug builds, or settings with `session_allow_ephemeral`, fall back to a
/// generated key when no key file can be read. Sessions signed with such a
/// key do not survive a restart.
///
/// # Examples
///
/// ```rust
/// use std::ffi::OsString;
///
/// use backend::inbound::http::session_config::{BuildMode, session_settings};
/// use backend::settings::ServerSettings;
/// use ortho_config::OrthoConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("whiskers_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let mut settings = ServerSettings::load_from_iter([OsString::from("whiskers-backend")])?;
/// settings.session_key_file = Some(key_path.clone());
/// let resolved = session_settings(&settings, BuildMode::Release)?;
/// assert_eq!(resolved.cookie_secure, settings.cookie_secure());
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings(
    settings: &ServerSettings,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let allow_ephemeral = mode.is_debug() || settings.session_allow_ephemeral;
    let key = match settings.session_key_file.as_deref() {
        Some(path) => match read_key(path, mode) {
            Ok(key) => key,
            Err(SessionConfigError::KeyRead { path, source }) if allow_ephemeral => {
                warn!(
                    path = %path.display(),
                    error = %source,
                    "using temporary session key"
                );
                Key::generate()
            }
            Err(err) => return Err(err),
        },
        None if allow_ephemeral => {
            warn!("no session key file configured; using temporary session key");
            Key::generate()
        }
        None => return Err(SessionConfigError::MissingKeyFile),
    };

    Ok(SessionSettings {
        key,
        cookie_secure: settings.cookie_secure(),
    })
}

fn read_key(path: &Path, mode: BuildMode) -> Result<Key, SessionConfigError> {
    let mut bytes = std::fs::read(path).map_err(|source| SessionConfigError::KeyRead {
        path: path.to_path_buf(),
        source,
    })?;
    let length = bytes.len();
    let min_len = if mode.is_debug() {
        SESSION_KEY_DERIVE_MIN_LEN
    } else {
        SESSION_KEY_MIN_LEN
    };
    if length < min_len {
        bytes.zeroize();
        return Err(SessionConfigError::KeyTooShort {
            path: path.to_path_buf(),
            length,
            min_len,
        });
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}

/// Cookie session middleware for the API scope.
///
/// Cookies are private (encrypted), http-only and expire two hours after
/// the last write.
pub fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(actix_web::cookie::time::Duration::hours(SESSION_TTL_HOURS)),
        )
        .build()
}

#[cfg(test)]
mod tests;
