use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// How long an issued token stays valid.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The authenticated user's id.
    #[serde(rename = "userId")]
    pub user_id: i32,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Why a token was rejected. Callers treat every kind the same way; the
/// distinction exists for logs and tests.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("token could not be decoded")]
    Malformed,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token has expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for VerificationError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        match error.kind() {
            ErrorKind::InvalidSignature => VerificationError::BadSignature,
            ErrorKind::ExpiredSignature => VerificationError::Expired,
            _ => VerificationError::Malformed,
        }
    }
}

/// Signs and verifies tokens with a single HMAC secret.
///
/// Built once from the configured secret and shared read-only by every request.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issues a token for `user_id`, valid for [`TOKEN_TTL_DAYS`].
    pub fn issue(&self, user_id: i32) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        self.sign(&claims)
    }

    /// Signs an arbitrary claim set.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AppError::Server(format!("Failed to generate token: {}", e)))
    }

    /// Checks the signature and expiry of `token` and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, VerificationError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(VerificationError::from)
    }
}
