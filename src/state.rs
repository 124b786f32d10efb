use std::sync::Arc;

use crate::auth::{PasswordError, PasswordHasher, TokenService};
use crate::config::AppConfig;
use crate::database::Repository;

/// Shared dependencies handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub tokens: Arc<TokenService>,
    pub hasher: Arc<PasswordHasher>,
}

impl AppState {
    /// Fails only if the configured bcrypt cost cannot produce the decoy hash.
    pub fn new(config: &AppConfig, repo: Arc<dyn Repository>) -> Result<Self, PasswordError> {
        Ok(Self {
            repo,
            tokens: Arc::new(TokenService::new(&config.security.jwt_secret)),
            hasher: Arc::new(PasswordHasher::new(config.security.bcrypt_cost)?),
        })
    }
}
