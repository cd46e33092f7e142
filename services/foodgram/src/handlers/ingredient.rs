use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use foodgram_auth_types::identity::Identity;
use foodgram_domain::id::IngredientId;

use crate::error::FoodgramError;
use crate::handlers::{IngredientResponse, Payload};
use crate::state::AppState;
use crate::usecase::ingredient::{
    CreateIngredientInput, CreateIngredientUseCase, GetIngredientUseCase, ListIngredientsUseCase,
};

// ── GET /api/ingredients/ ────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct IngredientListQuery {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
}

pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientListQuery>,
) -> Result<Json<Vec<IngredientResponse>>, FoodgramError> {
    let usecase = ListIngredientsUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredients = usecase.execute(query.name.as_deref()).await?;
    Ok(Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    ))
}

// ── GET /api/ingredients/{id}/ ───────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientResponse>, FoodgramError> {
    let usecase = GetIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredient = usecase.execute(IngredientId(id)).await?;
    Ok(Json(ingredient.into()))
}

// ── POST /api/ingredients/ ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
    pub measurement_unit: String,
}

pub async fn create_ingredient(
    identity: Identity,
    State(state): State<AppState>,
    Payload(body): Payload<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<IngredientResponse>), FoodgramError> {
    let usecase = CreateIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredient = usecase
        .execute(
            identity,
            CreateIngredientInput {
                name: body.name,
                measurement_unit: body.measurement_unit,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ingredient.into())))
}
