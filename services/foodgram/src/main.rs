use sea_orm::Database;
use tracing::info;

use foodgram::config::FoodgramConfig;
use foodgram::router::build_router;
use foodgram::state::AppState;
use foodgram_auth_types::identity::JwtSecret;

#[tokio::main]
async fn main() {
    foodgram_core::tracing::init_tracing();

    let config = FoodgramConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret),
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.foodgram_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("foodgram listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
