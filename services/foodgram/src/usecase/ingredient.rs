use foodgram_auth_types::identity::Identity;
use foodgram_domain::id::IngredientId;

use crate::domain::repository::IngredientRepository;
use crate::domain::types::{Ingredient, NAME_MAX_LEN, NewIngredient};
use crate::error::FoodgramError;

// ── ListIngredients ──────────────────────────────────────────────────────────

pub struct ListIngredientsUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> ListIngredientsUseCase<R> {
    /// A blank `name` is treated as no filter.
    pub async fn execute(&self, name: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError> {
        let prefix = name.map(str::trim).filter(|n| !n.is_empty());
        self.repo.list(prefix).await
    }
}

// ── GetIngredient ────────────────────────────────────────────────────────────

pub struct GetIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> GetIngredientUseCase<R> {
    pub async fn execute(&self, id: IngredientId) -> Result<Ingredient, FoodgramError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::IngredientNotFound)
    }
}

// ── CreateIngredient ─────────────────────────────────────────────────────────

pub struct CreateIngredientInput {
    pub name: String,
    pub measurement_unit: String,
}

pub struct CreateIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> CreateIngredientUseCase<R> {
    pub async fn execute(
        &self,
        actor: Identity,
        input: CreateIngredientInput,
    ) -> Result<Ingredient, FoodgramError> {
        if !actor.is_admin() {
            return Err(FoodgramError::Forbidden);
        }
        let name = input.name.trim();
        let unit = input.measurement_unit.trim();
        for value in [name, unit] {
            if value.is_empty() || value.chars().count() > NAME_MAX_LEN {
                return Err(FoodgramError::InvalidName);
            }
        }
        let ingredient = NewIngredient {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        };
        self.repo
            .create(&ingredient)
            .await?
            .ok_or(FoodgramError::IngredientAlreadyExists)
    }
}
