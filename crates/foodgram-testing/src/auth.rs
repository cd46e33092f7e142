//! Mock auth helpers for integration tests.
//!
//! `MockAuth` signs a real access token with a test secret so requests pass the
//! `Identity` extractor without going through the login flow.

use http::header::AUTHORIZATION;
use http::{HeaderName, HeaderValue};

use foodgram_auth_types::token::issue_access_token;
use foodgram_domain::id::UserId;
use foodgram_domain::user::UserRole;

/// Secret shared by `MockAuth` and the app state built in tests.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: UserId,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: i32) -> Self {
        Self {
            user_id: UserId(user_id),
            role: UserRole::Normal,
        }
    }

    pub fn admin(user_id: i32) -> Self {
        Self {
            user_id: UserId(user_id),
            role: UserRole::Admin,
        }
    }

    /// Signed token for this identity.
    pub fn token(&self) -> String {
        issue_access_token(self.user_id, self.role, TEST_JWT_SECRET)
            .expect("sign test token")
            .0
    }

    /// `Authorization: Token <jwt>` header pair.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Token {}", self.token()))
            .expect("token is a valid header value");
        (AUTHORIZATION, value)
    }
}
