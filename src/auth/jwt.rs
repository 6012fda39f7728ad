use axum::http::HeaderMap;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::store::entities::{User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub role: UserRole,
    pub token_kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub fn issue_access(&self, user: &User) -> Result<String, ApiError> {
        self.issue(user, TokenKind::Access, self.access_ttl_secs)
    }

    pub fn issue_refresh(&self, user: &User) -> Result<String, ApiError> {
        self.issue(user, TokenKind::Refresh, self.refresh_ttl_secs)
    }

    fn issue(&self, user: &User, kind: TokenKind, ttl_secs: i64) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.user_id,
            email: user.email.clone(),
            role: user.role,
            token_kind: kind,
            iat: now,
            exp: now + ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("failed to sign token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| ApiError::Unauthorized)
    }

    /// Verifies an access token and returns the subject user id. Refresh
    /// tokens are not accepted where an access token is expected.
    pub fn extract_user_id(&self, token: &str) -> Result<i64, ApiError> {
        let claims = self.verify(token)?;
        if claims.token_kind != TokenKind::Access {
            return Err(ApiError::Unauthorized);
        }
        Ok(claims.sub)
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)
}

/// The standard guard used by every protected handler.
pub fn require_user(headers: &HeaderMap, jwt: &JwtService) -> Result<i64, ApiError> {
    let token = bearer_token(headers)?;
    jwt.extract_user_id(token)
}

/// Like `require_user` but hands back the full claim set (for handlers that
/// need the email or role without a store round-trip).
pub fn require_claims(headers: &HeaderMap, jwt: &JwtService) -> Result<Claims, ApiError> {
    let token = bearer_token(headers)?;
    let claims = jwt.verify(token)?;
    if claims.token_kind != TokenKind::Access {
        return Err(ApiError::Unauthorized);
    }
    Ok(claims)
}
