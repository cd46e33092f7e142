//! JWT access-token issue and validation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use foodgram_domain::id::UserId;
use foodgram_domain::user::UserRole;

/// Access-token lifetime in seconds (7 days).
pub const ACCESS_TOKEN_EXP: u64 = 604800;

/// User identity extracted from a validated access token.
#[derive(Debug, Clone, Copy)]
pub struct TokenInfo {
    pub user_id: UserId,
    pub role: UserRole,
    pub exp: u64,
}

/// Errors returned by [`issue_access_token`] and [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Access-token claims: `sub` is the decimal user id, `role` the [`UserRole`]
/// wire value, `exp` the expiry in unix seconds.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub role: u8,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Sign a new access token. Returns the token and its expiration timestamp.
pub fn issue_access_token(
    user_id: UserId,
    role: UserRole,
    secret: &str,
) -> Result<(String, u64), AuthError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = JwtClaims {
        sub: user_id.to_string(),
        role: role.as_u8(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Signing)?;
    Ok((token, exp))
}

/// HS256 only. `exp` and `sub` must be present and `exp` must lie in the future.
fn decode_claims(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);

    let key = DecodingKey::from_secret(secret.as_bytes());
    decode::<JwtClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::Malformed,
        })
}

/// Validate an access token, returning parsed identity.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_claims(token, secret)?;
    let user_id = claims
        .sub
        .parse::<UserId>()
        .map_err(|_| AuthError::Malformed)?;
    let role = UserRole::from_u8(claims.role).ok_or(AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        role,
        exp: claims.exp,
    })
}
