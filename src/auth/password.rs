// Password hashing on the blocking thread pool

use bcrypt::{hash, verify};
use thiserror::Error;

/// Plaintext hashed at startup to produce the decoy for unknown-account logins
const DECOY_PASSWORD: &str = "datagate-decoy-password";

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// bcrypt hasher with a fixed work factor.
///
/// bcrypt is CPU bound, so both directions run under `spawn_blocking` to keep
/// the async workers free.
pub struct PasswordHasher {
    cost: u32,
    decoy: String,
}

impl PasswordHasher {
    /// Build a hasher and its decoy hash at the same cost, so the first
    /// unknown-account login is no slower than any later one.
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        let decoy = hash(DECOY_PASSWORD, cost)?;
        Ok(Self { cost, decoy })
    }

    /// Hash with a fresh random salt.
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let password = password.to_string();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || hash(password, cost)).await??;
        Ok(hashed)
    }

    pub async fn verify(&self, password: &str, hashed: &str) -> Result<bool, PasswordError> {
        let password = password.to_string();
        let hashed = hashed.to_string();
        let matched = tokio::task::spawn_blocking(move || verify(password, &hashed)).await??;
        Ok(matched)
    }

    /// Spend the same work as a real verification when there is no account,
    /// so login latency does not reveal which emails are registered.
    pub async fn verify_decoy(&self, password: &str) -> Result<(), PasswordError> {
        self.verify(password, &self.decoy).await?;
        Ok(())
    }
}
