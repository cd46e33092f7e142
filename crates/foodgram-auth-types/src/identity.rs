//! Request identity extractors backed by `Authorization` header tokens.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;

use foodgram_domain::id::UserId;
use foodgram_domain::user::UserRole;

use crate::token::validate_access_token;

/// HMAC secret used to validate access tokens. Exposed to extractors through [`FromRef`].
#[derive(Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }
}

/// Authenticated caller. Rejects with 401 when the token is absent or invalid.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Caller that may be anonymous. A present but invalid token still rejects with 401.
#[derive(Debug, Clone, Copy)]
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn user_id(&self) -> Option<UserId> {
        self.0.map(|identity| identity.user_id)
    }
}

/// Accepts `Token <jwt>` (djoser-style) and `Bearer <jwt>`.
fn bearer_value(raw: &str) -> Option<&str> {
    let (scheme, value) = raw.trim().split_once(' ')?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    (scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer"))
        .then_some(value)
}

fn identity_from_parts(parts: &Parts, secret: &str) -> Result<Option<Identity>, StatusCode> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let token = header
        .to_str()
        .ok()
        .and_then(bearer_value)
        .ok_or(StatusCode::UNAUTHORIZED)?;
    match validate_access_token(token, secret) {
        Ok(info) => Ok(Some(Identity {
            user_id: info.user_id,
            role: info.role,
        })),
        Err(e) => {
            tracing::debug!(error = %e, "rejected access token");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    // Resolve synchronously and return a 'static future so the borrow of `parts`
    // does not leak into the returned future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = identity_from_parts(parts, &secret.0);
        async move { result?.ok_or(StatusCode::UNAUTHORIZED) }
    }
}

impl<S> FromRequestParts<S> for OptionalIdentity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = identity_from_parts(parts, &secret.0);
        async move { result.map(OptionalIdentity) }
    }
}
