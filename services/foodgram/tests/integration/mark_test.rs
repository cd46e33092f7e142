use foodgram::domain::repository::RecipeRepository;
use foodgram::domain::types::{IngredientAmount, RecipeMark, ValidSubmission};
use foodgram::error::FoodgramError;
use foodgram::usecase::mark::{AddRecipeMarkUseCase, RemoveRecipeMarkUseCase};
use foodgram_domain::id::{IngredientId, RecipeId, UserId};

use crate::helpers::MockDb;

async fn db_with_recipe() -> (MockDb, RecipeId) {
    let db = MockDb::new()
        .with_user(1, "author")
        .with_user(2, "reader")
        .with_ingredient(1, "flour", "g");
    let id = RecipeRepository::create(
        &db,
        UserId(1),
        &ValidSubmission {
            ingredients: vec![IngredientAmount {
                id: IngredientId(1),
                amount: 200,
            }],
            tags: vec![],
            image: "image.png".to_owned(),
            name: "Bread".to_owned(),
            text: "Bake it.".to_owned(),
            cooking_time: 60,
        },
    )
    .await
    .unwrap();
    (db, id)
}

fn add(db: &MockDb) -> AddRecipeMarkUseCase<MockDb, MockDb> {
    AddRecipeMarkUseCase {
        recipes: db.clone(),
        marks: db.clone(),
    }
}

fn remove(db: &MockDb) -> RemoveRecipeMarkUseCase<MockDb, MockDb> {
    RemoveRecipeMarkUseCase {
        recipes: db.clone(),
        marks: db.clone(),
    }
}

#[tokio::test]
async fn should_favorite_recipe_and_return_summary() {
    let (db, id) = db_with_recipe().await;
    let summary = add(&db)
        .execute(RecipeMark::Favorite, UserId(2), id)
        .await
        .unwrap();

    assert_eq!(summary.id, id);
    assert_eq!(summary.name, "Bread");
    assert_eq!(db.store().favorites, vec![(UserId(2), id)]);
}

#[tokio::test]
async fn should_reject_second_favorite_and_keep_single_row() {
    let (db, id) = db_with_recipe().await;
    add(&db)
        .execute(RecipeMark::Favorite, UserId(2), id)
        .await
        .unwrap();
    let result = add(&db).execute(RecipeMark::Favorite, UserId(2), id).await;

    assert!(
        matches!(result, Err(FoodgramError::AlreadyFavorited)),
        "expected AlreadyFavorited, got {result:?}"
    );
    assert_eq!(db.store().favorites.len(), 1);
}

#[tokio::test]
async fn should_reject_favoriting_own_recipe() {
    let (db, id) = db_with_recipe().await;
    let result = add(&db).execute(RecipeMark::Favorite, UserId(1), id).await;

    assert!(matches!(result, Err(FoodgramError::CannotFavoriteOwnRecipe)));
    assert!(db.store().favorites.is_empty());
}

#[tokio::test]
async fn should_allow_own_recipe_in_cart() {
    let (db, id) = db_with_recipe().await;
    add(&db)
        .execute(RecipeMark::ShoppingCart, UserId(1), id)
        .await
        .unwrap();

    let result = add(&db)
        .execute(RecipeMark::ShoppingCart, UserId(1), id)
        .await;
    assert!(matches!(result, Err(FoodgramError::AlreadyInCart)));
    assert_eq!(db.store().carts.len(), 1);
}

#[tokio::test]
async fn should_reject_mark_on_missing_recipe() {
    let (db, _) = db_with_recipe().await;
    let result = add(&db)
        .execute(RecipeMark::ShoppingCart, UserId(2), RecipeId(999))
        .await;

    assert!(matches!(result, Err(FoodgramError::RecipeNotFound)));
}

#[tokio::test]
async fn should_reject_removing_absent_marks() {
    let (db, id) = db_with_recipe().await;

    let favorite = remove(&db).execute(RecipeMark::Favorite, UserId(2), id).await;
    assert!(matches!(favorite, Err(FoodgramError::NotFavorited)));

    let cart = remove(&db)
        .execute(RecipeMark::ShoppingCart, UserId(2), id)
        .await;
    assert!(matches!(cart, Err(FoodgramError::NotInCart)));
}

#[tokio::test]
async fn should_remove_existing_mark() {
    let (db, id) = db_with_recipe().await;
    add(&db)
        .execute(RecipeMark::ShoppingCart, UserId(2), id)
        .await
        .unwrap();
    remove(&db)
        .execute(RecipeMark::ShoppingCart, UserId(2), id)
        .await
        .unwrap();

    assert!(db.store().carts.is_empty());
}
