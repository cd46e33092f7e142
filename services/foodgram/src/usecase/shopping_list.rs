use foodgram_domain::id::UserId;

use crate::domain::repository::ShoppingCartRepository;
use crate::domain::shopping_list::{aggregate, render};
use crate::error::FoodgramError;

// ── DownloadShoppingList ─────────────────────────────────────────────────────

pub struct DownloadShoppingListUseCase<R: ShoppingCartRepository> {
    pub repo: R,
}

impl<R: ShoppingCartRepository> DownloadShoppingListUseCase<R> {
    /// Rendered shopping list for the user's cart. Empty cart, empty string.
    pub async fn execute(&self, user_id: UserId) -> Result<String, FoodgramError> {
        let rows = self.repo.cart_ingredients(user_id).await?;
        let lines = aggregate(rows);
        tracing::debug!(user_id = %user_id, lines = lines.len(), "shopping list aggregated");
        Ok(render(&lines))
    }
}
