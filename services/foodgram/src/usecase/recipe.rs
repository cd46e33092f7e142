use foodgram_auth_types::identity::Identity;
use foodgram_domain::id::{IngredientId, RecipeId, UserId};
use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{IngredientRepository, RecipeRepository, TagRepository};
use crate::domain::types::{
    Recipe, RecipeFilter, RecipeSubmission, ValidSubmission, validate_submission,
};
use crate::error::FoodgramError;

/// Every referenced ingredient and tag must exist. Runs before any write.
async fn ensure_references<I: IngredientRepository, T: TagRepository>(
    ingredients: &I,
    tags: &T,
    submission: &ValidSubmission,
) -> Result<(), FoodgramError> {
    let ids: Vec<IngredientId> = submission.ingredients.iter().map(|i| i.id).collect();
    let existing = ingredients.existing_ids(&ids).await?;
    if ids.iter().any(|id| !existing.contains(id)) {
        return Err(FoodgramError::IngredientNotFound);
    }

    if !submission.tags.is_empty() {
        let existing = tags.existing_ids(&submission.tags).await?;
        if submission.tags.iter().any(|id| !existing.contains(id)) {
            return Err(FoodgramError::UnknownTag);
        }
    }
    Ok(())
}

/// Only the author or an administrator may change a recipe.
async fn authorize_mutation<R: RecipeRepository>(
    recipes: &R,
    actor: Identity,
    id: RecipeId,
) -> Result<(), FoodgramError> {
    let author_id = recipes
        .find_author(id)
        .await?
        .ok_or(FoodgramError::RecipeNotFound)?;
    if author_id != actor.user_id && !actor.is_admin() {
        return Err(FoodgramError::Forbidden);
    }
    Ok(())
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ListRecipesInput {
    pub author: Option<UserId>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

pub struct ListRecipesUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> ListRecipesUseCase<R> {
    pub async fn execute(
        &self,
        viewer: Option<UserId>,
        input: ListRecipesInput,
        page: PageRequest,
    ) -> Result<Page<Recipe>, FoodgramError> {
        let page = page.clamped();
        // Membership filters have no meaning without a viewer and are dropped.
        let filter = RecipeFilter {
            author: input.author,
            tags: input.tags,
            favorited_by: viewer.filter(|_| input.is_favorited),
            in_cart_of: viewer.filter(|_| input.is_in_shopping_cart),
        };
        let (recipes, count) = self.repo.list(&filter, viewer, page).await?;
        Ok(Page::new(recipes, count, page))
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> GetRecipeUseCase<R> {
    pub async fn execute(
        &self,
        id: RecipeId,
        viewer: Option<UserId>,
    ) -> Result<Recipe, FoodgramError> {
        self.repo
            .find(id, viewer)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<R: RecipeRepository, I: IngredientRepository, T: TagRepository> {
    pub recipes: R,
    pub ingredients: I,
    pub tags: T,
}

impl<R: RecipeRepository, I: IngredientRepository, T: TagRepository> CreateRecipeUseCase<R, I, T> {
    pub async fn execute(
        &self,
        author_id: UserId,
        input: RecipeSubmission,
    ) -> Result<Recipe, FoodgramError> {
        let submission = validate_submission(input)?;
        ensure_references(&self.ingredients, &self.tags, &submission).await?;

        let id = self.recipes.create(author_id, &submission).await?;
        tracing::info!(recipe_id = %id, author_id = %author_id, "recipe created");
        self.recipes
            .find(id, Some(author_id))
            .await?
            .ok_or(FoodgramError::RecipeNotFound)
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R: RecipeRepository, I: IngredientRepository, T: TagRepository> {
    pub recipes: R,
    pub ingredients: I,
    pub tags: T,
}

impl<R: RecipeRepository, I: IngredientRepository, T: TagRepository> UpdateRecipeUseCase<R, I, T> {
    /// Replaces the recipe fields and both association sets with the submission.
    pub async fn execute(
        &self,
        actor: Identity,
        id: RecipeId,
        input: RecipeSubmission,
    ) -> Result<Recipe, FoodgramError> {
        authorize_mutation(&self.recipes, actor, id).await?;
        let submission = validate_submission(input)?;
        ensure_references(&self.ingredients, &self.tags, &submission).await?;

        if !self.recipes.replace(id, &submission).await? {
            return Err(FoodgramError::RecipeNotFound);
        }
        tracing::info!(recipe_id = %id, user_id = %actor.user_id, "recipe updated");
        self.recipes
            .find(id, Some(actor.user_id))
            .await?
            .ok_or(FoodgramError::RecipeNotFound)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    pub async fn execute(&self, actor: Identity, id: RecipeId) -> Result<(), FoodgramError> {
        authorize_mutation(&self.repo, actor, id).await?;
        if !self.repo.delete(id).await? {
            return Err(FoodgramError::RecipeNotFound);
        }
        tracing::info!(recipe_id = %id, user_id = %actor.user_id, "recipe deleted");
        Ok(())
    }
}
