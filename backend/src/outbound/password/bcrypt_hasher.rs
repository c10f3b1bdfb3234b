//! bcrypt-backed `PasswordHasher`.
//!
//! bcrypt is CPU bound, so hashing and verification run on the blocking
//! thread pool rather than on the async workers.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordHash, PlainPassword};

/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// bcrypt hasher with an explicit work factor; each hash gets a fresh salt.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Build a hasher for `cost`.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hash`] when `cost` is outside
    /// [`MIN_COST`]..=[`MAX_COST`].
    pub fn new(cost: u32) -> Result<Self, PasswordHashError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordHashError::hash(format!(
                "bcrypt cost must be between {MIN_COST} and {MAX_COST}, got {cost}"
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, PasswordHashError> {
        let cost = self.cost;
        let plain = Zeroizing::new(password.expose().to_owned());
        tokio::task::spawn_blocking(move || bcrypt::hash(plain.as_str(), cost))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .map(PasswordHash::from_encoded)
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let plain = Zeroizing::new(password.expose().to_owned());
        let encoded = hash.as_encoded().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(plain.as_str(), &encoded))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))
    }
}
