//! Session token issuing and verification.
//!
//! Tokens are HS256 JWTs carrying the identity claim (email). They expire
//! one hour after issuance and are never persisted; verification is
//! side-effect-free.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Token lifetime.
const TOKEN_TTL_HOURS: i64 = 1;

/// Decoded identity claim attached to authenticated requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email.
    pub sub: String,
    /// The user's email (duplicated for clients that read it directly).
    pub email: String,
    /// Issued at (seconds since epoch).
    pub iat: i64,
    /// Expiration time (seconds since epoch).
    pub exp: i64,
}

/// Errors from token verification.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Signature invalid, malformed, or expired.
    #[error("invalid token")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Issues and verifies signed session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Build a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
        }
    }

    /// Sign a token for `email`, valid for one hour.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if signing fails.
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_owned(),
            email: email.to_owned(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::InvalidToken` on a bad signature, malformed
    /// token, or expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&SecretString::from("k9#mQ2$vX7!pL4@nR8%tZ1&wC5^bJ3*f"))
    }

    #[test]
    fn test_issue_then_verify() {
        let tokens = service();
        let token = tokens.issue("diner@example.com").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.email, "diner@example.com");
        assert_eq!(claims.sub, "diner@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(service().verify("not.a.token").is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = service().issue("diner@example.com").unwrap();
        let other = TokenService::new(&SecretString::from("z5!yB8@qW2#eT6$uI9%oP3^aS7&dF1*g"));
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired() {
        let secret = SecretString::from("k9#mQ2$vX7!pL4@nR8%tZ1&wC5^bJ3*f");
        let tokens = service();

        // Hand-roll an already-expired token with the same secret.
        let now = Utc::now();
        let claims = Claims {
            sub: "diner@example.com".to_owned(),
            email: "diner@example.com".to_owned(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
        )
        .unwrap();

        assert!(tokens.verify(&expired).is_err());
    }
}
