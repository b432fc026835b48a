//! Session token issuance and verification
//!
//! Sessions are stateless: a token is an HS256-signed claim set binding a
//! request to a user id with an expiry. Nothing is stored server-side, so
//! validity is purely a function of signature and expiry. Rotating the
//! signing secret invalidates all outstanding tokens.

use crate::config::AuthConfig;
use crate::core::error::ApiError;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried inside a session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id as string)
    pub sub: String,
    /// Expiration time (UTC timestamp)
    pub exp: i64,
    /// Issued at (UTC timestamp)
    pub iat: i64,
}

/// Issues and verifies signed, time-limited identity tokens.
///
/// The signing secret is an explicitly constructed configuration value
/// injected at startup, never ambient global state, so tests can construct
/// a service around a throwaway key.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            token_ttl: Duration::seconds(config.token_ttl_secs),
        }
    }

    /// Issue a token for a verified user id
    pub fn issue(&self, user_id: &Uuid) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + self.token_ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify a token and resolve it back to a user id.
    ///
    /// A bad signature, a malformed token, and a passed expiry all collapse
    /// into the same recoverable `Unauthorized` failure.
    pub fn verify(&self, token: &str) -> Result<Uuid, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        data.claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str, ttl_secs: i64) -> TokenService {
        TokenService::new(&AuthConfig {
            secret: secret.to_string(),
            token_ttl_secs: ttl_secs,
        })
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let tokens = service("test-secret", 3600);
        let user_id = Uuid::new_v4();

        let token = tokens.issue(&user_id).unwrap();
        let resolved = tokens.verify(&token).unwrap();

        assert_eq!(resolved, user_id);
    }

    #[test]
    fn test_token_resolves_to_no_other_user() {
        let tokens = service("test-secret", 3600);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let token = tokens.issue(&alice).unwrap();
        assert_ne!(tokens.verify(&token).unwrap(), bob);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Signature is valid at issuance time; only the expiry has passed.
        let tokens = service("test-secret", -120);
        let token = tokens.issue(&Uuid::new_v4()).unwrap();

        let err = tokens.verify(&token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = service("secret-a", 3600);
        let verifier = service("secret-b", 3600);

        let token = issuer.issue(&Uuid::new_v4()).unwrap();
        let err = verifier.verify(&token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let tokens = service("test-secret", 3600);
        assert!(matches!(
            tokens.verify("not-a-token").unwrap_err(),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            tokens.verify("").unwrap_err(),
            ApiError::Unauthorized(_)
        ));
    }
}
