use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use foodgram_auth_types::identity::Identity;
use foodgram_domain::id::RecipeId;

use crate::domain::types::RecipeMark;
use crate::error::FoodgramError;
use crate::handlers::RecipeSummaryResponse;
use crate::state::AppState;
use crate::usecase::mark::{AddRecipeMarkUseCase, RemoveRecipeMarkUseCase};

async fn add_mark(
    state: AppState,
    mark: RecipeMark,
    identity: Identity,
    recipe_id: i32,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), FoodgramError> {
    let usecase = AddRecipeMarkUseCase {
        recipes: state.recipe_repo(),
        marks: state.recipe_mark_repo(),
    };
    let summary = usecase
        .execute(mark, identity.user_id, RecipeId(recipe_id))
        .await?;
    tracing::info!(user_id = %identity.user_id, recipe_id, ?mark, "recipe mark added");
    Ok((StatusCode::CREATED, Json(summary.into())))
}

async fn remove_mark(
    state: AppState,
    mark: RecipeMark,
    identity: Identity,
    recipe_id: i32,
) -> Result<StatusCode, FoodgramError> {
    let usecase = RemoveRecipeMarkUseCase {
        recipes: state.recipe_repo(),
        marks: state.recipe_mark_repo(),
    };
    usecase
        .execute(mark, identity.user_id, RecipeId(recipe_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /api/recipes/{id}/favorite/ ─────────────────────────────────────────

pub async fn add_favorite(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), FoodgramError> {
    add_mark(state, RecipeMark::Favorite, identity, id).await
}

// ── DELETE /api/recipes/{id}/favorite/ ───────────────────────────────────────

pub async fn remove_favorite(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    remove_mark(state, RecipeMark::Favorite, identity, id).await
}

// ── POST /api/recipes/{id}/shopping_cart/ ────────────────────────────────────

pub async fn add_to_cart(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), FoodgramError> {
    add_mark(state, RecipeMark::ShoppingCart, identity, id).await
}

// ── DELETE /api/recipes/{id}/shopping_cart/ ──────────────────────────────────

pub async fn remove_from_cart(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    remove_mark(state, RecipeMark::ShoppingCart, identity, id).await
}
