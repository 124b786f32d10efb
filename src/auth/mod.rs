pub mod password;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::models::Role;

pub use password::{PasswordError, PasswordHasher};

/// Lifetime of every issued token. There is no refresh; clients log in again.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(id: i32, role: Role) -> Self {
        Self::issued_at(id, role, Utc::now())
    }

    pub fn issued_at(id: i32, role: Role, now: DateTime<Utc>) -> Self {
        Self {
            id,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("Invalid JWT token: {0}")]
    Invalid(String),
}

/// Signs and verifies HS256 tokens with a single shared secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is dead the second its hour is up.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Check signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_one_hour_after_issue() {
        let claims = Claims::new(1, Role::User);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn verify_returns_issued_claims() {
        let tokens = TokenService::new("secret");
        let claims = Claims::new(42, Role::Admin);

        let token = tokens.issue(&claims).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), claims);
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = TokenService::new("secret");
        let issued = Utc::now() - Duration::seconds(TOKEN_TTL_SECS + 1);
        let token = tokens.issue(&Claims::issued_at(1, Role::Admin, issued)).unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let ours = TokenService::new("secret");
        let theirs = TokenService::new("another-secret");
        let token = theirs.issue(&Claims::new(1, Role::Admin)).unwrap();

        assert!(ours.verify(&token).is_err());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let tokens = TokenService::new("secret");
        let token = tokens.issue(&Claims::new(1, Role::User)).unwrap();

        // Swap the payload for one claiming admin, keeping the original signature.
        let forged = tokens.issue(&Claims::new(1, Role::Admin)).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload = forged.split('.').nth(1).unwrap();
        parts[1] = forged_payload;

        assert!(tokens.verify(&parts.join(".")).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let tokens = TokenService::new("secret");
        assert!(tokens.verify("not-a-jwt").is_err());
        assert!(tokens.verify("").is_err());
    }
}
