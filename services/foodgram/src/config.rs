/// Foodgram service configuration loaded from environment variables.
#[derive(Debug)]
pub struct FoodgramConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for access tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 8000). Env var: `FOODGRAM_PORT`.
    pub foodgram_port: u16,
}

impl FoodgramConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            foodgram_port: std::env::var("FOODGRAM_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
        }
    }
}
