use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};

use foodgram_auth_types::identity::Identity;

use crate::error::FoodgramError;
use crate::state::AppState;
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

// ── GET /api/recipes/download_shopping_cart/ ─────────────────────────────────

pub async fn download_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, FoodgramError> {
    let usecase = DownloadShoppingListUseCase {
        repo: state.recipe_mark_repo(),
    };
    let body = usecase.execute(identity.user_id).await?;
    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"shopping_list.txt\""),
        ],
        body,
    ))
}
