use foodgram::domain::repository::RecipeRepository;
use foodgram::domain::types::{IngredientAmount, ValidSubmission};
use foodgram::error::FoodgramError;
use foodgram::usecase::follow::{ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase};
use foodgram_domain::id::{IngredientId, UserId};
use foodgram_domain::pagination::PageRequest;

use crate::helpers::MockDb;

fn seeded_db() -> MockDb {
    MockDb::new()
        .with_user(1, "follower")
        .with_user(2, "author")
        .with_ingredient(1, "salt", "g")
}

async fn add_recipe(db: &MockDb, author: i32, name: &str) {
    RecipeRepository::create(
        db,
        UserId(author),
        &ValidSubmission {
            ingredients: vec![IngredientAmount {
                id: IngredientId(1),
                amount: 1,
            }],
            tags: vec![],
            image: "image.png".to_owned(),
            name: name.to_owned(),
            text: "text".to_owned(),
            cooking_time: 5,
        },
    )
    .await
    .unwrap();
}

fn subscribe(db: &MockDb) -> SubscribeUseCase<MockDb, MockDb> {
    SubscribeUseCase {
        users: db.clone(),
        follows: db.clone(),
    }
}

#[tokio::test]
async fn should_subscribe_and_mark_author_as_subscribed() {
    let db = seeded_db();
    let subscription = subscribe(&db)
        .execute(UserId(1), UserId(2), None)
        .await
        .unwrap();

    assert_eq!(subscription.author.id, UserId(2));
    assert!(subscription.author.is_subscribed);
    assert_eq!(db.store().follows, vec![(UserId(1), UserId(2))]);
}

#[tokio::test]
async fn should_reject_self_subscription() {
    let db = seeded_db();
    let result = subscribe(&db).execute(UserId(1), UserId(1), None).await;

    assert!(matches!(result, Err(FoodgramError::CannotSubscribeToSelf)));
    assert!(db.store().follows.is_empty());
}

#[tokio::test]
async fn should_reject_duplicate_subscription() {
    let db = seeded_db();
    subscribe(&db)
        .execute(UserId(1), UserId(2), None)
        .await
        .unwrap();
    let result = subscribe(&db).execute(UserId(1), UserId(2), None).await;

    assert!(matches!(result, Err(FoodgramError::AlreadySubscribed)));
    assert_eq!(db.store().follows.len(), 1);
}

#[tokio::test]
async fn should_return_not_found_for_missing_author() {
    let db = seeded_db();
    let result = subscribe(&db).execute(UserId(1), UserId(77), None).await;

    assert!(matches!(result, Err(FoodgramError::UserNotFound)));
}

#[tokio::test]
async fn should_reject_unsubscribing_without_follow() {
    let db = seeded_db();
    let unsubscribe = UnsubscribeUseCase {
        users: db.clone(),
        follows: db.clone(),
    };
    let result = unsubscribe.execute(UserId(1), UserId(2)).await;

    assert!(matches!(result, Err(FoodgramError::NotSubscribed)));
    assert!(db.store().follows.is_empty());
}

#[tokio::test]
async fn should_unsubscribe_existing_follow() {
    let db = seeded_db();
    subscribe(&db)
        .execute(UserId(1), UserId(2), None)
        .await
        .unwrap();
    let unsubscribe = UnsubscribeUseCase {
        users: db.clone(),
        follows: db.clone(),
    };
    unsubscribe.execute(UserId(1), UserId(2)).await.unwrap();

    assert!(db.store().follows.is_empty());
}

#[tokio::test]
async fn should_truncate_recipe_preview_but_count_all() {
    let db = seeded_db();
    add_recipe(&db, 2, "first").await;
    add_recipe(&db, 2, "second").await;
    add_recipe(&db, 2, "third").await;
    subscribe(&db)
        .execute(UserId(1), UserId(2), None)
        .await
        .unwrap();

    let list = ListSubscriptionsUseCase { follows: db.clone() };
    let page = list
        .execute(UserId(1), PageRequest::default(), Some(2))
        .await
        .unwrap();

    assert_eq!(page.count, 1);
    let subscription = &page.results[0];
    assert_eq!(subscription.recipes_count, 3);
    let names: Vec<_> = subscription.recipes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["third", "second"]);
}
