use axum::{
    Router,
    routing::{get, post},
};

use foodgram_core::health::healthz;
use foodgram_core::middleware::with_observability;

use crate::handlers::{
    follow::{list_subscriptions, subscribe, unsubscribe},
    health::readyz,
    ingredient::{create_ingredient, get_ingredient, list_ingredients},
    mark::{add_favorite, add_to_cart, remove_favorite, remove_from_cart},
    recipe::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe},
    shopping_list::download_shopping_cart,
    tag::{create_tag, get_tag, list_tags},
    token::{login, logout},
    user::{
        block_user, get_me, get_user, list_users, register_user, set_password, unblock_user,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Users
        .route("/users/", get(list_users).post(register_user))
        .route("/users/me/", get(get_me))
        .route("/users/set_password/", post(set_password))
        .route("/users/subscriptions/", get(list_subscriptions))
        .route("/users/{id}/", get(get_user))
        .route("/users/{id}/subscribe/", post(subscribe).delete(unsubscribe))
        .route("/users/{id}/block/", post(block_user).delete(unblock_user))
        // Auth
        .route("/auth/token/login/", post(login))
        .route("/auth/token/logout/", post(logout))
        // Tags
        .route("/tags/", get(list_tags).post(create_tag))
        .route("/tags/{slug}/", get(get_tag))
        // Ingredients
        .route("/ingredients/", get(list_ingredients).post(create_ingredient))
        .route("/ingredients/{id}/", get(get_ingredient))
        // Recipes
        .route("/recipes/", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/download_shopping_cart/",
            get(download_shopping_cart),
        )
        .route(
            "/recipes/{id}/",
            get(get_recipe)
                .put(update_recipe)
                .patch(update_recipe)
                .delete(delete_recipe),
        )
        .route(
            "/recipes/{id}/favorite/",
            post(add_favorite).delete(remove_favorite),
        )
        .route(
            "/recipes/{id}/shopping_cart/",
            post(add_to_cart).delete(remove_from_cart),
        );

    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api)
        .with_state(state);
    with_observability(router)
}
