use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::Query;
use serde::Deserialize;

use foodgram_auth_types::identity::{Identity, OptionalIdentity};
use foodgram_domain::id::{IngredientId, RecipeId, TagId, UserId};
use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::types::{IngredientAmount, RecipeSubmission};
use crate::error::FoodgramError;
use crate::handlers::{Payload, RecipeResponse};
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesInput,
    ListRecipesUseCase, UpdateRecipeUseCase,
};

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: i32,
}

/// Write payload shared by POST, PUT and PATCH. Associations are always
/// replaced as a whole.
#[derive(Deserialize)]
pub struct RecipeWriteRequest {
    pub ingredients: Vec<IngredientAmountRequest>,
    #[serde(default)]
    pub tags: Vec<i32>,
    pub image: String,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
}

impl From<RecipeWriteRequest> for RecipeSubmission {
    fn from(body: RecipeWriteRequest) -> Self {
        Self {
            ingredients: body
                .ingredients
                .into_iter()
                .map(|line| IngredientAmount {
                    id: IngredientId(line.id),
                    amount: line.amount,
                })
                .collect(),
            tags: body.tags.into_iter().map(TagId).collect(),
            image: body.image,
            name: body.name,
            text: body.text,
            cooking_time: body.cooking_time,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct RecipeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<i32>,
    /// Repeatable tag slug.
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

/// Boolean query flags accept `1` and `true`.
fn flag(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v == "1" || v.eq_ignore_ascii_case("true"))
}

// ── GET /api/recipes/ ────────────────────────────────────────────────────────

pub async fn list_recipes(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Query(query): Query<RecipeListQuery>,
) -> Result<Json<Page<RecipeResponse>>, FoodgramError> {
    let usecase = ListRecipesUseCase {
        repo: state.recipe_repo(),
    };
    let input = ListRecipesInput {
        author: query.author.map(UserId),
        tags: query.tags,
        is_favorited: flag(query.is_favorited.as_deref()),
        is_in_shopping_cart: flag(query.is_in_shopping_cart.as_deref()),
    };
    let page = usecase
        .execute(
            identity.user_id(),
            input,
            PageRequest::from_query(query.page, query.limit),
        )
        .await?;
    Ok(Json(page.map(RecipeResponse::from)))
}

// ── POST /api/recipes/ ───────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Payload(body): Payload<RecipeWriteRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), FoodgramError> {
    let usecase = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        ingredients: state.ingredient_repo(),
        tags: state.tag_repo(),
    };
    let recipe = usecase.execute(identity.user_id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(recipe.into())))
}

// ── GET /api/recipes/{id}/ ───────────────────────────────────────────────────

pub async fn get_recipe(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, FoodgramError> {
    let usecase = GetRecipeUseCase {
        repo: state.recipe_repo(),
    };
    let recipe = usecase.execute(RecipeId(id), identity.user_id()).await?;
    Ok(Json(recipe.into()))
}

// ── PUT, PATCH /api/recipes/{id}/ ────────────────────────────────────────────

pub async fn update_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Payload(body): Payload<RecipeWriteRequest>,
) -> Result<Json<RecipeResponse>, FoodgramError> {
    let usecase = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        ingredients: state.ingredient_repo(),
        tags: state.tag_repo(),
    };
    let recipe = usecase
        .execute(identity, RecipeId(id), body.into())
        .await?;
    Ok(Json(recipe.into()))
}

// ── DELETE /api/recipes/{id}/ ────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    let usecase = DeleteRecipeUseCase {
        repo: state.recipe_repo(),
    };
    usecase.execute(identity, RecipeId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
