use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::Identity;

use crate::error::FoodgramError;
use crate::handlers::Payload;
use crate::state::AppState;
use crate::usecase::token::{LoginInput, LoginUseCase};

// ── POST /api/auth/token/login/ ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub auth_token: String,
    pub expires_at: u64,
}

pub async fn login(
    State(state): State<AppState>,
    Payload(body): Payload<LoginRequest>,
) -> Result<Json<LoginResponse>, FoodgramError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        hasher: state.password_hasher(),
        jwt_secret: state.jwt_secret.0.to_string(),
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        auth_token: output.auth_token,
        expires_at: output.expires_at,
    }))
}

// ── POST /api/auth/token/logout/ ─────────────────────────────────────────────

/// Tokens are not stored server-side. The extractor has already verified the
/// token, and the client is expected to discard it.
pub async fn logout(identity: Identity) -> StatusCode {
    tracing::info!(user_id = %identity.user_id, "user logged out");
    StatusCode::NO_CONTENT
}
