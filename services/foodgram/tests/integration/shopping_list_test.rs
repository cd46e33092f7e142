use foodgram::domain::repository::RecipeRepository;
use foodgram::domain::types::{IngredientAmount, ValidSubmission};
use foodgram::usecase::shopping_list::DownloadShoppingListUseCase;
use foodgram_domain::id::{IngredientId, RecipeId, UserId};

use crate::helpers::MockDb;

async fn add_recipe(db: &MockDb, lines: &[(i32, i32)]) -> RecipeId {
    RecipeRepository::create(
        db,
        UserId(1),
        &ValidSubmission {
            ingredients: lines
                .iter()
                .map(|&(id, amount)| IngredientAmount {
                    id: IngredientId(id),
                    amount,
                })
                .collect(),
            tags: vec![],
            image: "image.png".to_owned(),
            name: "recipe".to_owned(),
            text: "text".to_owned(),
            cooking_time: 10,
        },
    )
    .await
    .unwrap()
}

fn seeded_db() -> MockDb {
    MockDb::new()
        .with_user(1, "cook")
        .with_user(2, "shopper")
        .with_ingredient(1, "flour", "g")
        .with_ingredient(2, "flour", "kg")
        .with_ingredient(3, "sugar", "g")
}

#[tokio::test]
async fn should_merge_same_ingredient_across_recipes() {
    let db = seeded_db();
    let a = add_recipe(&db, &[(1, 200)]).await;
    let b = add_recipe(&db, &[(1, 300)]).await;
    db.store().carts.extend([(UserId(2), a), (UserId(2), b)]);

    let usecase = DownloadShoppingListUseCase { repo: db.clone() };
    let text = usecase.execute(UserId(2)).await.unwrap();

    assert_eq!(text, "flour - 500 g");
}

#[tokio::test]
async fn should_return_empty_text_for_empty_cart() {
    let db = seeded_db();
    add_recipe(&db, &[(1, 200)]).await;

    let usecase = DownloadShoppingListUseCase { repo: db.clone() };
    assert_eq!(usecase.execute(UserId(2)).await.unwrap(), "");
}

#[tokio::test]
async fn should_keep_units_apart_and_first_seen_order() {
    let db = seeded_db();
    let a = add_recipe(&db, &[(3, 50), (1, 200)]).await;
    let b = add_recipe(&db, &[(2, 1), (3, 25)]).await;
    db.store().carts.extend([(UserId(2), a), (UserId(2), b)]);

    let usecase = DownloadShoppingListUseCase { repo: db.clone() };
    let text = usecase.execute(UserId(2)).await.unwrap();

    assert_eq!(text, "sugar - 75 g\nflour - 200 g\nflour - 1 kg");
}

#[tokio::test]
async fn should_only_include_requesting_users_cart() {
    let db = seeded_db();
    let a = add_recipe(&db, &[(3, 10)]).await;
    db.store().carts.push((UserId(1), a));

    let usecase = DownloadShoppingListUseCase { repo: db.clone() };
    assert_eq!(usecase.execute(UserId(2)).await.unwrap(), "");
    assert_eq!(usecase.execute(UserId(1)).await.unwrap(), "sugar - 10 g");
}
