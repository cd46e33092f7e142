use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use foodgram::router::build_router;
use foodgram::state::AppState;
use foodgram_auth_types::identity::JwtSecret;
use foodgram_testing::auth::{MockAuth, TEST_JWT_SECRET};

/// Router over a disconnected database. Only paths that fail before touching
/// the store produce anything other than 500.
fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn recipe_body(ingredients: Value) -> Value {
    json!({
        "ingredients": ingredients,
        "tags": [1],
        "image": "data:image/png;base64,AAAA",
        "name": "Pancakes",
        "text": "Mix and fry.",
        "cooking_time": 15
    })
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_liveness_check() {
    let response = server().get("/healthz").await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let response = server().get("/readyz").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_attach_request_id_to_responses() {
    let response = server().get("/healthz").await;
    assert!(response.headers().contains_key("x-request-id"));
}

// ── Authentication ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_token_for_current_user() {
    let response = server().get("/api/users/me/").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_invalid_token_on_optional_routes() {
    let response = server()
        .get("/api/recipes/")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Token not-a-jwt"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_logout_authenticated_user() {
    let (name, value) = MockAuth::new(1).header();
    let response = server()
        .post("/api/auth/token/logout/")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn should_require_token_for_logout() {
    let response = server().post("/api/auth/token/logout/").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_require_token_for_favorites_and_cart() {
    let server = server();
    server
        .post("/api/recipes/1/favorite/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .delete("/api/recipes/1/shopping_cart/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/recipes/download_shopping_cart/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ── Validation before storage ────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_recipe_without_ingredients() {
    let (name, value) = MockAuth::new(1).header();
    let response = server()
        .post("/api/recipes/")
        .add_header(name, value)
        .json(&recipe_body(json!([])))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "EMPTY_INGREDIENTS");
}

#[tokio::test]
async fn should_reject_recipe_with_duplicate_ingredient() {
    let (name, value) = MockAuth::new(1).header();
    let response = server()
        .post("/api/recipes/")
        .add_header(name, value)
        .json(&recipe_body(json!([
            {"id": 1, "amount": 100},
            {"id": 1, "amount": 50}
        ])))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "DUPLICATE_INGREDIENT");
}

#[tokio::test]
async fn should_reject_recipe_with_zero_amount() {
    let (name, value) = MockAuth::new(1).header();
    let response = server()
        .post("/api/recipes/")
        .add_header(name, value)
        .json(&recipe_body(json!([{"id": 1, "amount": 0}])))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn should_reject_recipe_missing_ingredients_field() {
    let (name, value) = MockAuth::new(1).header();
    let response = server()
        .post("/api/recipes/")
        .add_header(name, value)
        .json(&json!({
            "tags": [1],
            "image": "x",
            "name": "P",
            "text": "t",
            "cooking_time": 15
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "INVALID_PAYLOAD");
    assert!(body["message"].as_str().unwrap().contains("ingredients"));
}

#[tokio::test]
async fn should_reject_recipe_with_out_of_range_amount() {
    let (name, value) = MockAuth::new(1).header();
    let response = server()
        .post("/api/recipes/")
        .add_header(name, value)
        .json(&recipe_body(json!([{"id": 1, "amount": 3_000_000_000u64}])))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_PAYLOAD");
}

#[tokio::test]
async fn should_reject_update_with_malformed_json() {
    let (name, value) = MockAuth::new(1).header();
    let response = server()
        .patch("/api/recipes/1/")
        .add_header(name, value)
        .text("{\"name\": ")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_PAYLOAD");
}

#[tokio::test]
async fn should_reject_login_without_json_content_type() {
    let response = server()
        .post("/api/auth/token/login/")
        .text("email=ada@example.com")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_PAYLOAD");
}

#[tokio::test]
async fn should_reject_registration_with_invalid_email() {
    let response = server()
        .post("/api/users/")
        .json(&json!({
            "email": "not-an-email",
            "username": "ada",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_EMAIL");
}

// ── Authorization ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_tag_creation_by_non_admin() {
    let (name, value) = MockAuth::new(1).header();
    let response = server()
        .post("/api/tags/")
        .add_header(name, value)
        .json(&json!({"name": "Breakfast", "color": "#E26C2D", "slug": "breakfast"}))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_forbid_ingredient_creation_by_non_admin() {
    let (name, value) = MockAuth::new(1).header();
    let response = server()
        .post("/api/ingredients/")
        .add_header(name, value)
        .json(&json!({"name": "flour", "measurement_unit": "g"}))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_invalid_tag_color_from_admin() {
    let (name, value) = MockAuth::admin(1).header();
    let response = server()
        .post("/api/tags/")
        .add_header(name, value)
        .json(&json!({"name": "Breakfast", "color": "orange", "slug": "breakfast"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_COLOR");
}

#[tokio::test]
async fn should_forbid_blocking_by_non_admin() {
    let (name, value) = MockAuth::new(1).header();
    let response = server()
        .post("/api/users/2/block/")
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

// ── Store failures ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_hide_store_failure_details() {
    let response = server().get("/api/tags/").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "INTERNAL");
    assert_eq!(body["message"], "internal error");
}
