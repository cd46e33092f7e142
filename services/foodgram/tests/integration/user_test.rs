use foodgram::error::FoodgramError;
use foodgram::usecase::token::{LoginInput, LoginUseCase};
use foodgram::usecase::user::{
    GetUserUseCase, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase, SetBlockedUseCase,
    SetPasswordInput, SetPasswordUseCase,
};
use foodgram_auth_types::token::validate_access_token;
use foodgram_domain::id::UserId;
use foodgram_domain::pagination::PageRequest;
use foodgram_domain::user::UserRole;

use crate::helpers::{MockDb, PlainHasher, TEST_JWT_SECRET, admin_identity, identity};

fn register_input(username: &str) -> RegisterUserInput {
    RegisterUserInput {
        email: format!("{username}@example.com"),
        username: username.to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        password: "password123".to_owned(),
    }
}

fn register(db: &MockDb) -> RegisterUserUseCase<MockDb, PlainHasher> {
    RegisterUserUseCase {
        repo: db.clone(),
        hasher: PlainHasher,
    }
}

fn login(db: &MockDb) -> LoginUseCase<MockDb, PlainHasher> {
    LoginUseCase {
        users: db.clone(),
        hasher: PlainHasher,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

fn credentials(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

// ── RegisterUserUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_user_with_hashed_password() {
    let db = MockDb::new();
    let user = register(&db).execute(register_input("ada")).await.unwrap();

    assert_eq!(user.username, "ada");
    assert_eq!(user.password_hash, "hashed:password123");
    assert!(!user.is_admin);
}

#[tokio::test]
async fn should_reject_duplicate_username_or_email() {
    let db = MockDb::new();
    register(&db).execute(register_input("ada")).await.unwrap();
    let result = register(&db).execute(register_input("ada")).await;

    assert!(matches!(result, Err(FoodgramError::UserAlreadyExists)));
    assert_eq!(db.store().users.len(), 1);
}

#[tokio::test]
async fn should_reject_reserved_username() {
    let db = MockDb::new();
    let result = register(&db).execute(register_input("me")).await;

    assert!(matches!(result, Err(FoodgramError::InvalidUsername)));
}

#[tokio::test]
async fn should_reject_short_password() {
    let db = MockDb::new();
    let mut input = register_input("ada");
    input.password = "short".to_owned();
    let result = register(&db).execute(input).await;

    assert!(matches!(result, Err(FoodgramError::InvalidPassword)));
    assert!(db.store().users.is_empty());
}

// ── LoginUseCase ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_token_for_valid_credentials() {
    let db = MockDb::new();
    let user = register(&db).execute(register_input("ada")).await.unwrap();

    let output = login(&db)
        .execute(credentials("ada@example.com", "password123"))
        .await
        .unwrap();

    let info = validate_access_token(&output.auth_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
    assert_eq!(info.role, UserRole::Normal);
    assert_eq!(info.exp, output.expires_at);
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_email_alike() {
    let db = MockDb::new();
    register(&db).execute(register_input("ada")).await.unwrap();

    let wrong_password = login(&db)
        .execute(credentials("ada@example.com", "not-the-password"))
        .await;
    assert!(matches!(wrong_password, Err(FoodgramError::InvalidCredentials)));

    let unknown = login(&db)
        .execute(credentials("nobody@example.com", "password123"))
        .await;
    assert!(matches!(unknown, Err(FoodgramError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_login_of_blocked_user() {
    let db = MockDb::new().with_user(1, "admin");
    db.store().users[0].is_admin = true;
    let user = register(&db).execute(register_input("ada")).await.unwrap();

    let block = SetBlockedUseCase { repo: db.clone() };
    block
        .execute(admin_identity(1), user.id, true)
        .await
        .unwrap();

    let result = login(&db)
        .execute(credentials("ada@example.com", "password123"))
        .await;
    assert!(matches!(result, Err(FoodgramError::UserBlocked)));

    block
        .execute(admin_identity(1), user.id, false)
        .await
        .unwrap();
    login(&db)
        .execute(credentials("ada@example.com", "password123"))
        .await
        .unwrap();
}

// ── SetBlockedUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_blocking_by_non_admin() {
    let db = MockDb::new().with_user(1, "alice").with_user(2, "bob");
    let block = SetBlockedUseCase { repo: db.clone() };

    let result = block.execute(identity(1), UserId(2), true).await;
    assert!(matches!(result, Err(FoodgramError::Forbidden)));
    assert!(!db.store().users[1].is_blocked);

    let missing = block.execute(admin_identity(1), UserId(9), true).await;
    assert!(matches!(missing, Err(FoodgramError::UserNotFound)));
}

// ── SetPasswordUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_change_password_after_verifying_current_one() {
    let db = MockDb::new();
    let user = register(&db).execute(register_input("ada")).await.unwrap();
    let usecase = SetPasswordUseCase {
        repo: db.clone(),
        hasher: PlainHasher,
    };

    let wrong = usecase
        .execute(
            user.id,
            SetPasswordInput {
                current_password: "guess".to_owned(),
                new_password: "new-password".to_owned(),
            },
        )
        .await;
    assert!(matches!(wrong, Err(FoodgramError::InvalidCredentials)));

    usecase
        .execute(
            user.id,
            SetPasswordInput {
                current_password: "password123".to_owned(),
                new_password: "new-password".to_owned(),
            },
        )
        .await
        .unwrap();

    login(&db)
        .execute(credentials("ada@example.com", "new-password"))
        .await
        .unwrap();
}

// ── GetUserUseCase / ListUsersUseCase ────────────────────────────────────────

#[tokio::test]
async fn should_report_subscription_relative_to_viewer() {
    let db = MockDb::new().with_user(1, "alice").with_user(2, "bob");
    db.store().follows.push((UserId(1), UserId(2)));

    let get = GetUserUseCase { repo: db.clone() };
    assert!(get.execute(UserId(2), Some(UserId(1))).await.unwrap().is_subscribed);
    assert!(!get.execute(UserId(2), None).await.unwrap().is_subscribed);

    let list = ListUsersUseCase { repo: db.clone() };
    let page = list
        .execute(Some(UserId(1)), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.count, 2);
    assert!(page.results.iter().any(|p| p.id == UserId(2) && p.is_subscribed));
}
