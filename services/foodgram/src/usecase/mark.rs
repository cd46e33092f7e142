use foodgram_domain::id::{RecipeId, UserId};

use crate::domain::repository::{RecipeMarkRepository, RecipeRepository};
use crate::domain::types::{RecipeMark, RecipeSummary};
use crate::error::FoodgramError;

// ── AddRecipeMark ────────────────────────────────────────────────────────────

pub struct AddRecipeMarkUseCase<R: RecipeRepository, M: RecipeMarkRepository> {
    pub recipes: R,
    pub marks: M,
}

impl<R: RecipeRepository, M: RecipeMarkRepository> AddRecipeMarkUseCase<R, M> {
    pub async fn execute(
        &self,
        mark: RecipeMark,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<RecipeSummary, FoodgramError> {
        let author_id = self
            .recipes
            .find_author(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if mark == RecipeMark::Favorite && author_id == user_id {
            return Err(FoodgramError::CannotFavoriteOwnRecipe);
        }
        if !self.marks.add(mark, user_id, recipe_id).await? {
            return Err(mark.already_present());
        }
        self.recipes
            .find_summary(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)
    }
}

// ── RemoveRecipeMark ─────────────────────────────────────────────────────────

pub struct RemoveRecipeMarkUseCase<R: RecipeRepository, M: RecipeMarkRepository> {
    pub recipes: R,
    pub marks: M,
}

impl<R: RecipeRepository, M: RecipeMarkRepository> RemoveRecipeMarkUseCase<R, M> {
    pub async fn execute(
        &self,
        mark: RecipeMark,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<(), FoodgramError> {
        if self.recipes.find_author(recipe_id).await?.is_none() {
            return Err(FoodgramError::RecipeNotFound);
        }
        if !self.marks.remove(mark, user_id, recipe_id).await? {
            return Err(mark.absent());
        }
        Ok(())
    }
}
