use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::{Identity, OptionalIdentity};
use foodgram_domain::id::UserId;
use foodgram_domain::pagination::Page;

use crate::error::FoodgramError;
use crate::handlers::{PageQuery, Payload, UserResponse};
use crate::state::AppState;
use crate::usecase::user::{
    GetUserUseCase, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase, SetBlockedUseCase,
    SetPasswordInput, SetPasswordUseCase,
};

// ── POST /api/users/ ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisteredUserResponse {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub async fn register_user(
    State(state): State<AppState>,
    Payload(body): Payload<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisteredUserResponse>), FoodgramError> {
    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
        hasher: state.password_hasher(),
    };
    let user = usecase
        .execute(RegisterUserInput {
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
            password: body.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisteredUserResponse {
            id: user.id.0,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }),
    ))
}

// ── GET /api/users/ ──────────────────────────────────────────────────────────

pub async fn list_users(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<UserResponse>>, FoodgramError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let page = usecase
        .execute(identity.user_id(), query.page_request())
        .await?;
    Ok(Json(page.map(UserResponse::from)))
}

// ── GET /api/users/me/ ───────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, FoodgramError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let profile = usecase
        .execute(identity.user_id, Some(identity.user_id))
        .await?;
    Ok(Json(profile.into()))
}

// ── GET /api/users/{id}/ ─────────────────────────────────────────────────────

pub async fn get_user(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, FoodgramError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let profile = usecase.execute(UserId(id), identity.user_id()).await?;
    Ok(Json(profile.into()))
}

// ── POST /api/users/set_password/ ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn set_password(
    identity: Identity,
    State(state): State<AppState>,
    Payload(body): Payload<SetPasswordRequest>,
) -> Result<StatusCode, FoodgramError> {
    let usecase = SetPasswordUseCase {
        repo: state.user_repo(),
        hasher: state.password_hasher(),
    };
    usecase
        .execute(
            identity.user_id,
            SetPasswordInput {
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /api/users/{id}/block/ ──────────────────────────────────────────────

pub async fn block_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    set_blocked(identity, state, UserId(id), true).await
}

// ── DELETE /api/users/{id}/block/ ────────────────────────────────────────────

pub async fn unblock_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    set_blocked(identity, state, UserId(id), false).await
}

async fn set_blocked(
    identity: Identity,
    state: AppState,
    target: UserId,
    blocked: bool,
) -> Result<StatusCode, FoodgramError> {
    let usecase = SetBlockedUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(identity, target, blocked).await?;
    Ok(StatusCode::NO_CONTENT)
}
