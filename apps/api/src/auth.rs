//! Bearer-token authentication for the `/api` routes.
//!
//! Tokens are issued elsewhere; this service only verifies them (HS256, shared secret).

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

pub const RECRUITER_ROLE: &str = "recruiter";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Token valid for 24 hours. Only tests mint tokens; production tokens come from the identity provider.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn create_token(&self, sub: &str, role: &str) -> anyhow::Result<String> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            role: role.to_string(),
            exp: (now + chrono::Duration::hours(24)).timestamp(),
            iat: now.timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Returns the claims if the signature is valid and the token has not expired.
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default()).map(|data| data.claims)
    }
}

/// The authenticated caller. Extracting it rejects the request with 401
/// when the bearer token is missing or invalid.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_recruiter(&self) -> bool {
        self.role.eq_ignore_ascii_case(RECRUITER_ROLE)
    }

    pub fn require_recruiter(&self) -> Result<(), AppError> {
        if self.is_recruiter() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(&parts.headers).ok_or(AppError::Unauthorized)?;

        let claims = state.jwt.verify_token(token).map_err(|e| {
            debug!("Rejected bearer token: {e}");
            AppError::Unauthorized
        })?;

        Ok(AuthUser {
            username: claims.sub,
            role: claims.role,
        })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
