pub mod follow;
pub mod health;
pub mod ingredient;
pub mod mark;
pub mod recipe;
pub mod shopping_list;
pub mod tag;
pub mod token;
pub mod user;

use axum::extract::FromRequest;
use serde::{Deserialize, Serialize};

use foodgram_domain::pagination::PageRequest;

use crate::domain::types::{
    Ingredient, Recipe, RecipeIngredient, RecipeSummary, Subscription, Tag, UserProfile,
};
use crate::error::FoodgramError;

// ── Request body ─────────────────────────────────────────────────────────────

/// JSON body extractor that rejects with [`FoodgramError::InvalidPayload`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(FoodgramError))]
pub struct Payload<T>(pub T);

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_query(self.page, self.limit)
    }
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.0,
            email: profile.email,
            username: profile.username,
            first_name: profile.first_name,
            last_name: profile.last_name,
            is_subscribed: profile.is_subscribed,
        }
    }
}

#[derive(Serialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id.0,
            name: tag.name,
            color: tag.color.to_string(),
            slug: tag.slug,
        }
    }
}

#[derive(Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id.0,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

/// Ingredient line of a recipe: the ingredient fields plus `amount`.
#[derive(Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<RecipeIngredient> for RecipeIngredientResponse {
    fn from(line: RecipeIngredient) -> Self {
        Self {
            id: line.ingredient.id.0,
            name: line.ingredient.name,
            measurement_unit: line.ingredient.measurement_unit,
            amount: line.amount,
        }
    }
}

#[derive(Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id.0,
            tags: recipe.tags.into_iter().map(Into::into).collect(),
            author: recipe.author.into(),
            ingredients: recipe.ingredients.into_iter().map(Into::into).collect(),
            is_favorited: recipe.is_favorited,
            is_in_shopping_cart: recipe.is_in_shopping_cart,
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        }
    }
}

#[derive(Serialize)]
pub struct RecipeSummaryResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<RecipeSummary> for RecipeSummaryResponse {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id.0,
            name: summary.name,
            image: summary.image,
            cooking_time: summary.cooking_time,
        }
    }
}

#[derive(Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub author: UserResponse,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: u64,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            author: subscription.author.into(),
            recipes: subscription.recipes.into_iter().map(Into::into).collect(),
            recipes_count: subscription.recipes_count,
        }
    }
}
