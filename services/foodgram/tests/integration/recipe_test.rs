use foodgram::domain::repository::RecipeRepository;
use foodgram::domain::types::{
    IngredientAmount, Recipe, RecipeFilter, RecipeSubmission, RecipeSummary, ValidSubmission,
};
use foodgram::error::FoodgramError;
use foodgram::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesInput,
    ListRecipesUseCase, UpdateRecipeUseCase,
};
use foodgram_domain::id::{IngredientId, RecipeId, TagId, UserId};
use foodgram_domain::pagination::PageRequest;

use crate::helpers::{MockDb, admin_identity, identity};

fn seeded_db() -> MockDb {
    MockDb::new()
        .with_user(1, "author")
        .with_user(2, "reader")
        .with_tag(1, "breakfast")
        .with_tag(2, "dinner")
        .with_ingredient(1, "flour", "g")
        .with_ingredient(2, "milk", "ml")
        .with_ingredient(3, "egg", "pcs")
}

fn submission(ingredients: &[(i32, i32)], tags: &[i32]) -> RecipeSubmission {
    RecipeSubmission {
        ingredients: ingredients
            .iter()
            .map(|&(id, amount)| IngredientAmount {
                id: IngredientId(id),
                amount,
            })
            .collect(),
        tags: tags.iter().copied().map(TagId).collect(),
        image: "data:image/png;base64,AAAA".to_owned(),
        name: "Pancakes".to_owned(),
        text: "Mix and fry.".to_owned(),
        cooking_time: 20,
    }
}

fn create_usecase(db: &MockDb) -> CreateRecipeUseCase<MockDb, MockDb, MockDb> {
    CreateRecipeUseCase {
        recipes: db.clone(),
        ingredients: db.clone(),
        tags: db.clone(),
    }
}

fn update_usecase(db: &MockDb) -> UpdateRecipeUseCase<MockDb, MockDb, MockDb> {
    UpdateRecipeUseCase {
        recipes: db.clone(),
        ingredients: db.clone(),
        tags: db.clone(),
    }
}

/// Deletes the recipe right before replacing it, as a concurrent DELETE would.
#[derive(Clone)]
struct DeletedDuringUpdate(MockDb);

impl RecipeRepository for DeletedDuringUpdate {
    async fn list(
        &self,
        filter: &RecipeFilter,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<(Vec<Recipe>, u64), FoodgramError> {
        self.0.list(filter, viewer, page).await
    }

    async fn find(
        &self,
        id: RecipeId,
        viewer: Option<UserId>,
    ) -> Result<Option<Recipe>, FoodgramError> {
        self.0.find(id, viewer).await
    }

    async fn find_author(&self, id: RecipeId) -> Result<Option<UserId>, FoodgramError> {
        self.0.find_author(id).await
    }

    async fn find_summary(&self, id: RecipeId) -> Result<Option<RecipeSummary>, FoodgramError> {
        self.0.find_summary(id).await
    }

    async fn create(
        &self,
        author_id: UserId,
        submission: &ValidSubmission,
    ) -> Result<RecipeId, FoodgramError> {
        self.0.create(author_id, submission).await
    }

    async fn replace(
        &self,
        id: RecipeId,
        submission: &ValidSubmission,
    ) -> Result<bool, FoodgramError> {
        self.0.delete(id).await?;
        self.0.replace(id, submission).await
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, FoodgramError> {
        self.0.delete(id).await
    }
}

// ── CreateRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_persist_exactly_submitted_ingredient_pairs() {
    let db = seeded_db();
    let recipe = create_usecase(&db)
        .execute(UserId(1), submission(&[(1, 200), (2, 300)], &[1]))
        .await
        .unwrap();

    assert_eq!(db.ingredient_pairs(recipe.id), vec![(1, 200), (2, 300)]);
    assert_eq!(recipe.author.id, UserId(1));
    assert_eq!(recipe.tags.len(), 1);
    assert_eq!(recipe.ingredients[0].ingredient.name, "flour");
    assert!(!recipe.is_favorited);
}

#[tokio::test]
async fn should_reject_duplicate_ingredient_without_persisting() {
    let db = seeded_db();
    let result = create_usecase(&db)
        .execute(UserId(1), submission(&[(1, 200), (1, 300)], &[]))
        .await;

    assert!(
        matches!(result, Err(FoodgramError::DuplicateIngredient)),
        "expected DuplicateIngredient, got {result:?}"
    );
    assert!(db.store().recipes.is_empty());
}

#[tokio::test]
async fn should_reject_non_positive_amount() {
    let db = seeded_db();
    let result = create_usecase(&db)
        .execute(UserId(1), submission(&[(1, 0)], &[]))
        .await;

    assert!(matches!(result, Err(FoodgramError::InvalidAmount)));
    assert!(db.store().recipes.is_empty());
}

#[tokio::test]
async fn should_reject_empty_ingredient_list() {
    let db = seeded_db();
    let result = create_usecase(&db)
        .execute(UserId(1), submission(&[], &[]))
        .await;

    assert!(matches!(result, Err(FoodgramError::EmptyIngredients)));
}

#[tokio::test]
async fn should_reject_unknown_ingredient_without_persisting() {
    let db = seeded_db();
    let result = create_usecase(&db)
        .execute(UserId(1), submission(&[(1, 100), (99, 5)], &[]))
        .await;

    assert!(matches!(result, Err(FoodgramError::IngredientNotFound)));
    assert!(db.store().recipes.is_empty());
}

#[tokio::test]
async fn should_reject_unknown_tag() {
    let db = seeded_db();
    let result = create_usecase(&db)
        .execute(UserId(1), submission(&[(1, 100)], &[1, 42]))
        .await;

    assert!(matches!(result, Err(FoodgramError::UnknownTag)));
    assert!(db.store().recipes.is_empty());
}

#[tokio::test]
async fn should_collapse_repeated_tags() {
    let db = seeded_db();
    let recipe = create_usecase(&db)
        .execute(UserId(1), submission(&[(1, 100)], &[2, 1, 2]))
        .await
        .unwrap();

    let slugs: Vec<_> = recipe.tags.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, vec!["dinner", "breakfast"]);
}

// ── UpdateRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_associations_instead_of_merging() {
    let db = seeded_db();
    let created = create_usecase(&db)
        .execute(UserId(1), submission(&[(1, 200), (2, 300)], &[1, 2]))
        .await
        .unwrap();

    let updated = update_usecase(&db)
        .execute(identity(1), created.id, submission(&[(3, 2)], &[2]))
        .await
        .unwrap();

    assert_eq!(db.ingredient_pairs(created.id), vec![(3, 2)]);
    assert_eq!(updated.ingredients.len(), 1);
    assert_eq!(updated.tags.len(), 1);
    assert_eq!(updated.tags[0].slug, "dinner");
}

#[tokio::test]
async fn should_report_not_found_when_recipe_is_deleted_during_update() {
    let db = seeded_db();
    let created = create_usecase(&db)
        .execute(UserId(1), submission(&[(1, 200)], &[1]))
        .await
        .unwrap();

    let usecase = UpdateRecipeUseCase {
        recipes: DeletedDuringUpdate(db.clone()),
        ingredients: db.clone(),
        tags: db.clone(),
    };
    let result = usecase
        .execute(identity(1), created.id, submission(&[(2, 5)], &[]))
        .await;

    assert!(matches!(result, Err(FoodgramError::RecipeNotFound)));
    assert!(db.ingredient_pairs(created.id).is_empty());
}

#[tokio::test]
async fn should_keep_previous_state_when_update_is_invalid() {
    let db = seeded_db();
    let created = create_usecase(&db)
        .execute(UserId(1), submission(&[(1, 200)], &[]))
        .await
        .unwrap();

    let result = update_usecase(&db)
        .execute(identity(1), created.id, submission(&[(2, 5), (2, 6)], &[]))
        .await;

    assert!(matches!(result, Err(FoodgramError::DuplicateIngredient)));
    assert_eq!(db.ingredient_pairs(created.id), vec![(1, 200)]);
}

#[tokio::test]
async fn should_forbid_update_by_other_user() {
    let db = seeded_db();
    let created = create_usecase(&db)
        .execute(UserId(1), submission(&[(1, 200)], &[]))
        .await
        .unwrap();

    let result = update_usecase(&db)
        .execute(identity(2), created.id, submission(&[(2, 1)], &[]))
        .await;

    assert!(matches!(result, Err(FoodgramError::Forbidden)));
    assert_eq!(db.ingredient_pairs(created.id), vec![(1, 200)]);
}

#[tokio::test]
async fn should_allow_admin_to_update_any_recipe() {
    let db = seeded_db();
    let created = create_usecase(&db)
        .execute(UserId(1), submission(&[(1, 200)], &[]))
        .await
        .unwrap();

    update_usecase(&db)
        .execute(admin_identity(2), created.id, submission(&[(2, 1)], &[]))
        .await
        .unwrap();

    assert_eq!(db.ingredient_pairs(created.id), vec![(2, 1)]);
}

#[tokio::test]
async fn should_return_not_found_when_updating_missing_recipe() {
    let db = seeded_db();
    let result = update_usecase(&db)
        .execute(identity(1), RecipeId(404), submission(&[(1, 1)], &[]))
        .await;

    assert!(matches!(result, Err(FoodgramError::RecipeNotFound)));
}

// ── DeleteRecipeUseCase / GetRecipeUseCase ───────────────────────────────────

#[tokio::test]
async fn should_delete_own_recipe() {
    let db = seeded_db();
    let created = create_usecase(&db)
        .execute(UserId(1), submission(&[(1, 200)], &[]))
        .await
        .unwrap();

    let delete = DeleteRecipeUseCase { repo: db.clone() };
    assert!(matches!(
        delete.execute(identity(2), created.id).await,
        Err(FoodgramError::Forbidden)
    ));
    delete.execute(identity(1), created.id).await.unwrap();

    let get = GetRecipeUseCase { repo: db.clone() };
    assert!(matches!(
        get.execute(created.id, None).await,
        Err(FoodgramError::RecipeNotFound)
    ));
}

// ── ListRecipesUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_filter_by_tag_slug_and_author() {
    let db = seeded_db().with_user(3, "chef");
    let create = create_usecase(&db);
    create
        .execute(UserId(1), submission(&[(1, 1)], &[1]))
        .await
        .unwrap();
    create
        .execute(UserId(3), submission(&[(1, 1)], &[2]))
        .await
        .unwrap();

    let list = ListRecipesUseCase { repo: db.clone() };
    let by_tag = list
        .execute(
            None,
            ListRecipesInput {
                tags: vec!["dinner".to_owned()],
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_tag.count, 1);
    assert_eq!(by_tag.results[0].author.id, UserId(3));

    let by_author = list
        .execute(
            None,
            ListRecipesInput {
                author: Some(UserId(1)),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_author.count, 1);
    assert_eq!(by_author.results[0].author.id, UserId(1));
}

#[tokio::test]
async fn should_ignore_membership_filters_for_anonymous_viewer() {
    let db = seeded_db();
    create_usecase(&db)
        .execute(UserId(1), submission(&[(1, 1)], &[]))
        .await
        .unwrap();

    let list = ListRecipesUseCase { repo: db.clone() };
    let input = || ListRecipesInput {
        is_favorited: true,
        ..Default::default()
    };

    let anonymous = list
        .execute(None, input(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(anonymous.count, 1);

    let signed_in = list
        .execute(Some(UserId(2)), input(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(signed_in.count, 0);
}

#[tokio::test]
async fn should_paginate_with_page_numbers() {
    let db = seeded_db();
    let create = create_usecase(&db);
    for _ in 0..3 {
        create
            .execute(UserId(1), submission(&[(1, 1)], &[]))
            .await
            .unwrap();
    }

    let list = ListRecipesUseCase { repo: db.clone() };
    let page = list
        .execute(
            None,
            ListRecipesInput::default(),
            PageRequest { limit: 2, page: 1 },
        )
        .await
        .unwrap();

    assert_eq!(page.count, 3);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.next, Some(2));
    assert_eq!(page.previous, None);
}
