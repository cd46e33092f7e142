use chrono::{DateTime, Utc};

use foodgram_domain::id::{IngredientId, RecipeId, TagId, UserId};
use foodgram_domain::tag::HexColor;
use foodgram_domain::user::UserRole;

use crate::error::FoodgramError;

/// Maximum length of recipe, tag and ingredient names.
pub const NAME_MAX_LEN: usize = 200;

/// Registered account, including credentials. Never serialized directly.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_blocked: bool,
}

impl User {
    pub fn role(&self) -> UserRole {
        UserRole::from_is_admin(self.is_admin)
    }
}

/// Fields needed to insert a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Public user representation, with `is_subscribed` computed for the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: HexColor,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub color: HexColor,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// Full recipe read model. Membership flags are relative to the viewer.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: RecipeId,
    pub author: UserProfile,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
}

/// Short recipe form returned by favorite, cart and subscription endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

/// An author followed by the viewer, with a preview of their recipes.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub author: UserProfile,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: u64,
}

/// Per-user recipe membership. Both marks share the (user, recipe) pair model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeMark {
    Favorite,
    ShoppingCart,
}

impl RecipeMark {
    pub fn already_present(self) -> FoodgramError {
        match self {
            Self::Favorite => FoodgramError::AlreadyFavorited,
            Self::ShoppingCart => FoodgramError::AlreadyInCart,
        }
    }

    pub fn absent(self) -> FoodgramError {
        match self {
            Self::Favorite => FoodgramError::NotFavorited,
            Self::ShoppingCart => FoodgramError::NotInCart,
        }
    }
}

/// Recipe list filters. The membership filters only apply to a known viewer.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub author: Option<UserId>,
    /// Tag slugs, OR-combined.
    pub tags: Vec<String>,
    pub favorited_by: Option<UserId>,
    pub in_cart_of: Option<UserId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub id: IngredientId,
    pub amount: i32,
}

/// Raw recipe write payload, as submitted for create and update.
#[derive(Debug, Clone)]
pub struct RecipeSubmission {
    pub ingredients: Vec<IngredientAmount>,
    pub tags: Vec<TagId>,
    pub image: String,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
}

/// A submission that passed [`validate_submission`]. Tags are deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub ingredients: Vec<IngredientAmount>,
    pub tags: Vec<TagId>,
    pub image: String,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
}

/// Shape checks on a recipe payload that need no store access.
///
/// Reference checks (ingredient and tag existence) happen in the use case.
pub fn validate_submission(input: RecipeSubmission) -> Result<ValidSubmission, FoodgramError> {
    let name = input.name.trim();
    if name.is_empty() || name.chars().count() > NAME_MAX_LEN {
        return Err(FoodgramError::InvalidName);
    }
    if input.cooking_time <= 0 {
        return Err(FoodgramError::InvalidCookingTime);
    }
    if input.ingredients.is_empty() {
        return Err(FoodgramError::EmptyIngredients);
    }
    let mut seen = std::collections::HashSet::with_capacity(input.ingredients.len());
    for line in &input.ingredients {
        if !seen.insert(line.id) {
            return Err(FoodgramError::DuplicateIngredient);
        }
        if line.amount <= 0 {
            return Err(FoodgramError::InvalidAmount);
        }
    }

    let mut tags = Vec::with_capacity(input.tags.len());
    for tag in input.tags {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    Ok(ValidSubmission {
        ingredients: input.ingredients,
        tags,
        image: input.image,
        name: name.to_owned(),
        text: input.text,
        cooking_time: input.cooking_time,
    })
}
