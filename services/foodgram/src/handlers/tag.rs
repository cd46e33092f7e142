use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use foodgram_auth_types::identity::Identity;

use crate::error::FoodgramError;
use crate::handlers::{Payload, TagResponse};
use crate::state::AppState;
use crate::usecase::tag::{CreateTagInput, CreateTagUseCase, GetTagUseCase, ListTagsUseCase};

// ── GET /api/tags/ ───────────────────────────────────────────────────────────

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, FoodgramError> {
    let usecase = ListTagsUseCase {
        repo: state.tag_repo(),
    };
    let tags = usecase.execute().await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

// ── GET /api/tags/{slug}/ ────────────────────────────────────────────────────

pub async fn get_tag(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<TagResponse>, FoodgramError> {
    let usecase = GetTagUseCase {
        repo: state.tag_repo(),
    };
    let tag = usecase.execute(&slug).await?;
    Ok(Json(tag.into()))
}

// ── POST /api/tags/ ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub color: String,
    pub slug: String,
}

pub async fn create_tag(
    identity: Identity,
    State(state): State<AppState>,
    Payload(body): Payload<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagResponse>), FoodgramError> {
    let usecase = CreateTagUseCase {
        repo: state.tag_repo(),
    };
    let tag = usecase
        .execute(
            identity,
            CreateTagInput {
                name: body.name,
                color: body.color,
                slug: body.slug,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(tag.into())))
}
