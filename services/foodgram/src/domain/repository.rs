#![allow(async_fn_in_trait)]

use foodgram_domain::id::{IngredientId, RecipeId, TagId, UserId};
use foodgram_domain::pagination::PageRequest;

use crate::domain::shopping_list::CartIngredient;
use crate::domain::types::{
    Ingredient, NewIngredient, NewTag, NewUser, Recipe, RecipeFilter, RecipeMark, RecipeSummary,
    Subscription, Tag, User, UserProfile, ValidSubmission,
};
use crate::error::FoodgramError;

/// Repository for user accounts and their public profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, FoodgramError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, FoodgramError>;

    /// Insert a user. Returns `None` when the email or username is already taken.
    async fn create(&self, user: &NewUser) -> Result<Option<User>, FoodgramError>;

    async fn update_password(&self, id: UserId, password_hash: &str)
    -> Result<(), FoodgramError>;

    /// Set the blocked flag. Returns `false` if the user does not exist.
    async fn set_blocked(&self, id: UserId, blocked: bool) -> Result<bool, FoodgramError>;

    async fn profile(
        &self,
        id: UserId,
        viewer: Option<UserId>,
    ) -> Result<Option<UserProfile>, FoodgramError>;

    /// One page of profiles ordered by id, plus the total user count.
    async fn list_profiles(
        &self,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<(Vec<UserProfile>, u64), FoodgramError>;
}

/// Repository for author subscriptions.
pub trait FollowRepository: Send + Sync {
    /// Insert the pair. Returns `false` if it already exists.
    async fn follow(&self, user_id: UserId, author_id: UserId) -> Result<bool, FoodgramError>;

    /// Delete the pair. Returns `true` if a row was deleted.
    async fn unfollow(&self, user_id: UserId, author_id: UserId) -> Result<bool, FoodgramError>;

    async fn subscription(
        &self,
        user_id: UserId,
        author_id: UserId,
        recipes_limit: Option<u32>,
    ) -> Result<Option<Subscription>, FoodgramError>;

    async fn subscriptions(
        &self,
        user_id: UserId,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<(Vec<Subscription>, u64), FoodgramError>;
}

/// Repository for tag reference data.
pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, FoodgramError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, FoodgramError>;

    /// Insert a tag. Returns `None` when the name or slug is already taken.
    async fn create(&self, tag: &NewTag) -> Result<Option<Tag>, FoodgramError>;

    /// The subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[TagId]) -> Result<Vec<TagId>, FoodgramError>;
}

/// Repository for ingredient reference data.
pub trait IngredientRepository: Send + Sync {
    /// All ingredients, optionally filtered by a case-insensitive name prefix.
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError>;
    async fn find_by_id(&self, id: IngredientId) -> Result<Option<Ingredient>, FoodgramError>;

    /// Insert an ingredient. Returns `None` when (name, unit) already exists.
    async fn create(&self, ingredient: &NewIngredient)
    -> Result<Option<Ingredient>, FoodgramError>;

    /// The subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[IngredientId])
    -> Result<Vec<IngredientId>, FoodgramError>;
}

/// Repository for recipes and their tag and ingredient associations.
pub trait RecipeRepository: Send + Sync {
    async fn list(
        &self,
        filter: &RecipeFilter,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<(Vec<Recipe>, u64), FoodgramError>;

    async fn find(
        &self,
        id: RecipeId,
        viewer: Option<UserId>,
    ) -> Result<Option<Recipe>, FoodgramError>;

    async fn find_author(&self, id: RecipeId) -> Result<Option<UserId>, FoodgramError>;
    async fn find_summary(&self, id: RecipeId) -> Result<Option<RecipeSummary>, FoodgramError>;

    /// Insert the recipe row and its associations in one transaction.
    async fn create(
        &self,
        author_id: UserId,
        submission: &ValidSubmission,
    ) -> Result<RecipeId, FoodgramError>;

    /// Update the recipe row, clear its associations and re-insert them, in one transaction.
    /// Returns `false` if the recipe no longer exists.
    async fn replace(&self, id: RecipeId, submission: &ValidSubmission)
    -> Result<bool, FoodgramError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: RecipeId) -> Result<bool, FoodgramError>;
}

/// Repository for favorite and shopping-cart pairs.
pub trait RecipeMarkRepository: Send + Sync {
    /// Insert the pair. Returns `false` if it already exists.
    async fn add(
        &self,
        mark: RecipeMark,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, FoodgramError>;

    /// Delete the pair. Returns `true` if a row was deleted.
    async fn remove(
        &self,
        mark: RecipeMark,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, FoodgramError>;
}

/// Source rows for the shopping-list aggregation.
pub trait ShoppingCartRepository: Send + Sync {
    /// Ingredient rows of every recipe in the cart, in cart order then recipe order.
    async fn cart_ingredients(&self, user_id: UserId)
    -> Result<Vec<CartIngredient>, FoodgramError>;
}

/// Password hashing port. Implementations must not block the async runtime.
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, FoodgramError>;
    async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, FoodgramError>;
}
