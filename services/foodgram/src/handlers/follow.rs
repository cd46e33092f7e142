use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use foodgram_auth_types::identity::Identity;
use foodgram_domain::id::UserId;
use foodgram_domain::pagination::{Page, PageRequest};

use crate::error::FoodgramError;
use crate::handlers::SubscriptionResponse;
use crate::state::AppState;
use crate::usecase::follow::{ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase};

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct SubscriptionQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Caps the recipe preview of each author.
    pub recipes_limit: Option<u32>,
}

// ── GET /api/users/subscriptions/ ────────────────────────────────────────────

pub async fn list_subscriptions(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<SubscriptionQuery>,
) -> Result<Json<Page<SubscriptionResponse>>, FoodgramError> {
    let usecase = ListSubscriptionsUseCase {
        follows: state.follow_repo(),
    };
    let page = usecase
        .execute(
            identity.user_id,
            PageRequest::from_query(query.page, query.limit),
            query.recipes_limit,
        )
        .await?;
    Ok(Json(page.map(SubscriptionResponse::from)))
}

// ── POST /api/users/{id}/subscribe/ ──────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct SubscribeQuery {
    pub recipes_limit: Option<u32>,
}

pub async fn subscribe(
    identity: Identity,
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
    Query(query): Query<SubscribeQuery>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), FoodgramError> {
    let usecase = SubscribeUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    let subscription = usecase
        .execute(identity.user_id, UserId(author_id), query.recipes_limit)
        .await?;
    Ok((StatusCode::CREATED, Json(subscription.into())))
}

// ── DELETE /api/users/{id}/subscribe/ ────────────────────────────────────────

pub async fn unsubscribe(
    identity: Identity,
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    let usecase = UnsubscribeUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    usecase.execute(identity.user_id, UserId(author_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
