//! Token issuance and verification, exposed as an injected capability so the
//! auth gate and the login flow depend on a trait rather than on the JWT
//! library directly.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("no token found")]
    Missing,
    #[error("token signing error: {0}")]
    Signing(String),
    #[error("Unauthorized")]
    Invalid,
}

/// Two-method token capability: issue a signed token for a username, verify
/// a presented token back into its claims.
pub trait TokenAuthority: Send + Sync {
    fn issue(&self, username: &str) -> Result<String, TokenError>;
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// HS256 implementation. Validity is entirely a function of the token's own
/// signature and expiry; there is no session store or revocation list.
pub struct HmacTokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl HmacTokenAuthority {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
        }
    }
}

impl TokenAuthority for HmacTokenAuthority {
    fn issue(&self, username: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_verify_round_trip() {
        let authority = HmacTokenAuthority::new("test-secret", 1);
        let token = authority.issue("admin").unwrap();
        let claims = authority.verify(&token).unwrap();
        assert_eq!(claims.username, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let token = HmacTokenAuthority::new("secret-a", 1).issue("admin").unwrap();
        let err = HmacTokenAuthority::new("secret-b", 1).verify(&token).unwrap_err();
        assert!(matches!(err, TokenError::Invalid));
    }

    #[test]
    fn verify_rejects_garbage() {
        let authority = HmacTokenAuthority::new("test-secret", 1);
        assert!(authority.verify("not-a-token").is_err());
    }
}
