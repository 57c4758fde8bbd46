use crate::config::Config;
use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims encoded within a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's username.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues and validates signed, time-limited session tokens.
///
/// Holds the symmetric signing key and the fixed TTL, both injected from
/// `Config` at startup. Business logic never reads ambient environment
/// state; the secret lives only here.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_secs: config.token_ttl_secs,
        }
    }

    /// Produces a signed token for the given subject, expiring after the
    /// configured TTL.
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::seconds(self.ttl_secs))
            .ok_or_else(|| AppError::InternalServerError("Token expiry overflow".into()))?
            .timestamp() as usize;

        let claims = Claims {
            sub: subject.to_owned(),
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to issue token: {}", e)))
    }

    /// Verifies signature and expiry, returning the embedded subject.
    ///
    /// Malformed tokens, signature mismatches and expired tokens all
    /// collapse into the same `Unauthorized` error; callers cannot tell
    /// which check failed.
    pub fn validate(&self, token: &str) -> Result<String, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims.sub)
            .map_err(AppError::from)
    }
}
