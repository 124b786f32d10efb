use std::env;
use thiserror::Error;

/// Signing secret used when `JWT_SECRET` is unset in development.
const DEVELOPMENT_JWT_SECRET: &str = "datagate-development-secret-do-not-deploy";

/// bcrypt accepts work factors in this range.
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub idle_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    /// True when `jwt_secret` is the built-in development fallback.
    pub using_fallback_secret: bool,
    pub bcrypt_cost: u32,
}

// Keep the secret out of debug output.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("using_fallback_secret", &self.using_fallback_secret)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match var("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        };

        config.with_env_overrides(&var)?.validated()
    }

    fn with_env_overrides<F>(mut self, var: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = var("HOST") {
            self.server.host = v;
        }
        if let Some(v) = var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Database overrides
        self.database = self.database.with_env_overrides(var)?;

        // Security overrides
        match var("JWT_SECRET").filter(|v| !v.is_empty()) {
            Some(secret) => {
                self.security.jwt_secret = secret;
                self.security.using_fallback_secret = false;
            }
            None if self.environment == Environment::Production => {
                return Err(ConfigError::Missing("JWT_SECRET"));
            }
            None => {}
        }
        if let Some(v) = var("BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }

        Ok(self)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if !BCRYPT_COST_RANGE.contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                reason: format!(
                    "{} is outside {}..={}",
                    self.security.bcrypt_cost,
                    BCRYPT_COST_RANGE.start(),
                    BCRYPT_COST_RANGE.end()
                ),
            });
        }
        self.database.check()?;
        Ok(self)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig::defaults(),
            security: SecurityConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                using_fallback_secret: true,
                bcrypt_cost: 10,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig::defaults(),
            security: SecurityConfig {
                jwt_secret: String::new(),
                using_fallback_secret: false,
                bcrypt_cost: 10,
            },
        }
    }
}

impl DatabaseConfig {
    /// Database settings alone, for commands that never serve requests.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::defaults().with_env_overrides(&var)?;
        config.check()?;
        Ok(config)
    }

    fn with_env_overrides<F>(mut self, var: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.url = var("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        if let Some(v) = var("DATABASE_MAX_CONNECTIONS") {
            self.max_connections = v.parse().unwrap_or(self.max_connections);
        }
        if let Some(v) = var("DATABASE_CONNECTION_TIMEOUT") {
            self.connection_timeout = v.parse().unwrap_or(self.connection_timeout);
        }
        if let Some(v) = var("DATABASE_IDLE_TIMEOUT") {
            self.idle_timeout = v.parse().unwrap_or(self.idle_timeout);
        }
        if let Some(v) = var("DATABASE_RUN_MIGRATIONS") {
            self.run_migrations = v.parse().unwrap_or(self.run_migrations);
        }
        Ok(self)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    fn defaults() -> Self {
        Self {
            url: String::new(),
            max_connections: 20,
            connection_timeout: 2,
            idle_timeout: 30,
            run_migrations: true,
        }
    }
}
