use std::collections::{HashMap, HashSet};

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    Statement, TransactionTrait,
    sea_query::{Expr, Func, OnConflict, Query},
};

use foodgram_domain::id::{IngredientId, RecipeId, TagId, UserId};
use foodgram_domain::pagination::PageRequest;
use foodgram_domain::tag::HexColor;
use foodgram_schema::{
    favorites, follows, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_carts,
    tags, users,
};

use crate::domain::repository::{
    FollowRepository, IngredientRepository, RecipeMarkRepository, RecipeRepository,
    ShoppingCartRepository, TagRepository, UserRepository,
};
use crate::domain::shopping_list::CartIngredient;
use crate::domain::types::{
    Ingredient, NewIngredient, NewTag, NewUser, Recipe, RecipeFilter, RecipeIngredient,
    RecipeMark, RecipeSummary, Subscription, Tag, User, UserProfile, ValidSubmission,
};
use crate::error::FoodgramError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, FoodgramError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, FoodgramError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &NewUser) -> Result<Option<User>, FoodgramError> {
        let result = users::ActiveModel {
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            password_hash: Set(user.password_hash.clone()),
            is_admin: Set(false),
            is_blocked: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(Some(user_from_model(model))),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), FoodgramError> {
        users::ActiveModel {
            id: Set(id.0),
            password_hash: Set(password_hash.to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user password")?;
        Ok(())
    }

    async fn set_blocked(&self, id: UserId, blocked: bool) -> Result<bool, FoodgramError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::IsBlocked, Expr::value(blocked))
            .filter(users::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("set user blocked flag")?;
        Ok(result.rows_affected > 0)
    }

    async fn profile(
        &self,
        id: UserId,
        viewer: Option<UserId>,
    ) -> Result<Option<UserProfile>, FoodgramError> {
        let Some(model) = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user profile")?
        else {
            return Ok(None);
        };
        let followed = followed_authors(&self.db, viewer, &[model.id]).await?;
        let is_subscribed = followed.contains(&model.id);
        Ok(Some(profile_from_model(model, is_subscribed)))
    }

    async fn list_profiles(
        &self,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<(Vec<UserProfile>, u64), FoodgramError> {
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        let models = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list users")?;
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let followed = followed_authors(&self.db, viewer, &ids).await?;
        let profiles = models
            .into_iter()
            .map(|m| {
                let is_subscribed = followed.contains(&m.id);
                profile_from_model(m, is_subscribed)
            })
            .collect();
        Ok((profiles, count))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: UserId(model.id),
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        password_hash: model.password_hash,
        is_admin: model.is_admin,
        is_blocked: model.is_blocked,
    }
}

fn profile_from_model(model: users::Model, is_subscribed: bool) -> UserProfile {
    UserProfile {
        id: UserId(model.id),
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        is_subscribed,
    }
}

/// The subset of `author_ids` the viewer follows. Empty for anonymous viewers.
async fn followed_authors<C: ConnectionTrait>(
    db: &C,
    viewer: Option<UserId>,
    author_ids: &[i32],
) -> anyhow::Result<HashSet<i32>> {
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };
    if author_ids.is_empty() {
        return Ok(HashSet::new());
    }
    let ids: Vec<i32> = follows::Entity::find()
        .select_only()
        .column(follows::Column::AuthorId)
        .filter(follows::Column::UserId.eq(viewer.0))
        .filter(follows::Column::AuthorId.is_in(author_ids.iter().copied()))
        .into_tuple::<i32>()
        .all(db)
        .await
        .context("load followed authors")?;
    Ok(ids.into_iter().collect())
}

// ── Follow repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFollowRepository {
    pub db: DatabaseConnection,
}

impl FollowRepository for DbFollowRepository {
    async fn follow(&self, user_id: UserId, author_id: UserId) -> Result<bool, FoodgramError> {
        let inserted = follows::Entity::insert(follows::ActiveModel {
            user_id: Set(user_id.0),
            author_id: Set(author_id.0),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([follows::Column::UserId, follows::Column::AuthorId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert follow")?;
        Ok(inserted > 0)
    }

    async fn unfollow(&self, user_id: UserId, author_id: UserId) -> Result<bool, FoodgramError> {
        let result = follows::Entity::delete_many()
            .filter(follows::Column::UserId.eq(user_id.0))
            .filter(follows::Column::AuthorId.eq(author_id.0))
            .exec(&self.db)
            .await
            .context("delete follow")?;
        Ok(result.rows_affected > 0)
    }

    async fn subscription(
        &self,
        user_id: UserId,
        author_id: UserId,
        recipes_limit: Option<u32>,
    ) -> Result<Option<Subscription>, FoodgramError> {
        let Some(author) = users::Entity::find_by_id(author_id.0)
            .one(&self.db)
            .await
            .context("find subscription author")?
        else {
            return Ok(None);
        };
        let followed = followed_authors(&self.db, Some(user_id), &[author.id]).await?;
        let is_subscribed = followed.contains(&author.id);
        let subscription =
            load_subscription(&self.db, author, is_subscribed, recipes_limit).await?;
        Ok(Some(subscription))
    }

    async fn subscriptions(
        &self,
        user_id: UserId,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<(Vec<Subscription>, u64), FoodgramError> {
        let query = follows::Entity::find().filter(follows::Column::UserId.eq(user_id.0));
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count subscriptions")?;
        let rows = query
            .order_by_desc(follows::Column::CreatedAt)
            .order_by_asc(follows::Column::AuthorId)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list subscriptions")?;

        let author_ids: Vec<i32> = rows.iter().map(|f| f.author_id).collect();
        let mut authors: HashMap<i32, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(author_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("load subscription authors")?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut subscriptions = Vec::with_capacity(author_ids.len());
        for author_id in author_ids {
            if let Some(author) = authors.remove(&author_id) {
                subscriptions.push(load_subscription(&self.db, author, true, recipes_limit).await?);
            }
        }
        Ok((subscriptions, count))
    }
}

async fn load_subscription<C: ConnectionTrait>(
    db: &C,
    author: users::Model,
    is_subscribed: bool,
    recipes_limit: Option<u32>,
) -> anyhow::Result<Subscription> {
    let query = recipes::Entity::find().filter(recipes::Column::AuthorId.eq(author.id));
    let recipes_count = query
        .clone()
        .count(db)
        .await
        .context("count author recipes")?;
    let mut query = query
        .order_by_desc(recipes::Column::CreatedAt)
        .order_by_desc(recipes::Column::Id);
    if let Some(limit) = recipes_limit {
        query = query.limit(u64::from(limit));
    }
    let recipes = query
        .all(db)
        .await
        .context("list author recipes")?
        .into_iter()
        .map(summary_from_model)
        .collect();
    Ok(Subscription {
        author: profile_from_model(author, is_subscribed),
        recipes,
        recipes_count,
    })
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, FoodgramError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await
            .context("list tags")?;
        let tags = models
            .into_iter()
            .map(tag_from_model)
            .collect::<anyhow::Result<_>>()?;
        Ok(tags)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, FoodgramError> {
        let model = tags::Entity::find()
            .filter(tags::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .context("find tag by slug")?;
        Ok(model.map(tag_from_model).transpose()?)
    }

    async fn create(&self, tag: &NewTag) -> Result<Option<Tag>, FoodgramError> {
        let result = tags::ActiveModel {
            name: Set(tag.name.clone()),
            color: Set(tag.color.to_string()),
            slug: Set(tag.slug.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(Some(tag_from_model(model)?)),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("create tag").into()),
        }
    }

    async fn existing_ids(&self, ids: &[TagId]) -> Result<Vec<TagId>, FoodgramError> {
        let found: Vec<i32> = tags::Entity::find()
            .select_only()
            .column(tags::Column::Id)
            .filter(tags::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("find existing tag ids")?;
        Ok(found.into_iter().map(TagId).collect())
    }
}

fn tag_from_model(model: tags::Model) -> anyhow::Result<Tag> {
    let color = model
        .color
        .parse::<HexColor>()
        .with_context(|| format!("stored color of tag {}", model.id))?;
    Ok(Tag {
        id: TagId(model.id),
        name: model.name,
        color,
        slug: model.slug,
    })
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

/// Escape LIKE wildcards so user input matches literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl IngredientRepository for DbIngredientRepository {
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(ingredients::Column::Name)))
                    .like(like_prefix(prefix)),
            );
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("list ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: IngredientId) -> Result<Option<Ingredient>, FoodgramError> {
        let model = ingredients::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn create(
        &self,
        ingredient: &NewIngredient,
    ) -> Result<Option<Ingredient>, FoodgramError> {
        let result = ingredients::ActiveModel {
            name: Set(ingredient.name.clone()),
            measurement_unit: Set(ingredient.measurement_unit.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(Some(ingredient_from_model(model))),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("create ingredient").into()),
        }
    }

    async fn existing_ids(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<IngredientId>, FoodgramError> {
        let found: Vec<i32> = ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Id)
            .filter(ingredients::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("find existing ingredient ids")?;
        Ok(found.into_iter().map(IngredientId).collect())
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: IngredientId(model.id),
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

impl RecipeRepository for DbRecipeRepository {
    async fn list(
        &self,
        filter: &RecipeFilter,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<(Vec<Recipe>, u64), FoodgramError> {
        let mut query = recipes::Entity::find();
        if let Some(author) = filter.author {
            query = query.filter(recipes::Column::AuthorId.eq(author.0));
        }
        if !filter.tags.is_empty() {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
                        .from(recipe_tags::Entity)
                        .inner_join(
                            tags::Entity,
                            Expr::col((tags::Entity, tags::Column::Id))
                                .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
                        )
                        .and_where(
                            Expr::col((tags::Entity, tags::Column::Slug))
                                .is_in(filter.tags.iter().cloned()),
                        )
                        .to_owned(),
                ),
            );
        }
        if let Some(user) = filter.favorited_by {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(favorites::Column::RecipeId)
                        .from(favorites::Entity)
                        .and_where(favorites::Column::UserId.eq(user.0))
                        .to_owned(),
                ),
            );
        }
        if let Some(user) = filter.in_cart_of {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(shopping_carts::Column::RecipeId)
                        .from(shopping_carts::Entity)
                        .and_where(shopping_carts::Column::UserId.eq(user.0))
                        .to_owned(),
                ),
            );
        }

        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count recipes")?;
        let models = query
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list recipes")?;
        let recipes = load_recipes(&self.db, models, viewer).await?;
        Ok((recipes, count))
    }

    async fn find(
        &self,
        id: RecipeId,
        viewer: Option<UserId>,
    ) -> Result<Option<Recipe>, FoodgramError> {
        let Some(model) = recipes::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find recipe by id")?
        else {
            return Ok(None);
        };
        let mut recipes = load_recipes(&self.db, vec![model], viewer).await?;
        Ok(recipes.pop())
    }

    async fn find_author(&self, id: RecipeId) -> Result<Option<UserId>, FoodgramError> {
        let author: Option<i32> = recipes::Entity::find_by_id(id.0)
            .select_only()
            .column(recipes::Column::AuthorId)
            .into_tuple::<i32>()
            .one(&self.db)
            .await
            .context("find recipe author")?;
        Ok(author.map(UserId))
    }

    async fn find_summary(&self, id: RecipeId) -> Result<Option<RecipeSummary>, FoodgramError> {
        let model = recipes::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find recipe summary")?;
        Ok(model.map(summary_from_model))
    }

    async fn create(
        &self,
        author_id: UserId,
        submission: &ValidSubmission,
    ) -> Result<RecipeId, FoodgramError> {
        let id = self
            .db
            .transaction::<_, i32, DbErr>(|txn| {
                let submission = submission.clone();
                Box::pin(async move {
                    let recipe = recipes::ActiveModel {
                        author_id: Set(author_id.0),
                        name: Set(submission.name.clone()),
                        image: Set(submission.image.clone()),
                        text: Set(submission.text.clone()),
                        cooking_time: Set(submission.cooking_time),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    insert_associations(txn, recipe.id, &submission).await?;
                    Ok(recipe.id)
                })
            })
            .await
            .context("create recipe")?;
        Ok(RecipeId(id))
    }

    async fn replace(
        &self,
        id: RecipeId,
        submission: &ValidSubmission,
    ) -> Result<bool, FoodgramError> {
        let replaced = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let submission = submission.clone();
                Box::pin(async move {
                    let updated = recipes::Entity::update_many()
                        .col_expr(recipes::Column::Name, Expr::value(submission.name.clone()))
                        .col_expr(recipes::Column::Image, Expr::value(submission.image.clone()))
                        .col_expr(recipes::Column::Text, Expr::value(submission.text.clone()))
                        .col_expr(
                            recipes::Column::CookingTime,
                            Expr::value(submission.cooking_time),
                        )
                        .filter(recipes::Column::Id.eq(id.0))
                        .exec(txn)
                        .await?;
                    if updated.rows_affected == 0 {
                        return Ok(false);
                    }

                    recipe_tags::Entity::delete_many()
                        .filter(recipe_tags::Column::RecipeId.eq(id.0))
                        .exec(txn)
                        .await?;
                    recipe_ingredients::Entity::delete_many()
                        .filter(recipe_ingredients::Column::RecipeId.eq(id.0))
                        .exec(txn)
                        .await?;

                    insert_associations(txn, id.0, &submission).await?;
                    Ok(true)
                })
            })
            .await
            .context("replace recipe associations")?;
        Ok(replaced)
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, FoodgramError> {
        let result = recipes::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }
}

/// Insert tag links and ingredient lines for a recipe. `position` keeps submission order.
async fn insert_associations<C: ConnectionTrait>(
    db: &C,
    recipe_id: i32,
    submission: &ValidSubmission,
) -> Result<(), DbErr> {
    if !submission.tags.is_empty() {
        recipe_tags::Entity::insert_many(submission.tags.iter().map(|tag| {
            recipe_tags::ActiveModel {
                recipe_id: Set(recipe_id),
                tag_id: Set(tag.0),
            }
        }))
        .exec_without_returning(db)
        .await?;
    }
    if !submission.ingredients.is_empty() {
        recipe_ingredients::Entity::insert_many(submission.ingredients.iter().zip(0..).map(
            |(line, position)| recipe_ingredients::ActiveModel {
                recipe_id: Set(recipe_id),
                ingredient_id: Set(line.id.0),
                amount: Set(line.amount),
                position: Set(position),
            },
        ))
        .exec_without_returning(db)
        .await?;
    }
    Ok(())
}

fn summary_from_model(model: recipes::Model) -> RecipeSummary {
    RecipeSummary {
        id: RecipeId(model.id),
        name: model.name,
        image: model.image,
        cooking_time: model.cooking_time,
    }
}

/// Recipe ids among `recipe_ids` that the viewer has marked.
async fn marked_recipes<C: ConnectionTrait>(
    db: &C,
    mark: RecipeMark,
    viewer: Option<UserId>,
    recipe_ids: &[i32],
) -> anyhow::Result<HashSet<i32>> {
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };
    let ids: Vec<i32> = match mark {
        RecipeMark::Favorite => {
            favorites::Entity::find()
                .select_only()
                .column(favorites::Column::RecipeId)
                .filter(favorites::Column::UserId.eq(viewer.0))
                .filter(favorites::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                .into_tuple::<i32>()
                .all(db)
                .await
        }
        RecipeMark::ShoppingCart => {
            shopping_carts::Entity::find()
                .select_only()
                .column(shopping_carts::Column::RecipeId)
                .filter(shopping_carts::Column::UserId.eq(viewer.0))
                .filter(shopping_carts::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                .into_tuple::<i32>()
                .all(db)
                .await
        }
    }
    .context("load recipe marks")?;
    Ok(ids.into_iter().collect())
}

/// Assemble full read models for a page of recipe rows, preserving row order.
async fn load_recipes<C: ConnectionTrait>(
    db: &C,
    models: Vec<recipes::Model>,
    viewer: Option<UserId>,
) -> anyhow::Result<Vec<Recipe>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let recipe_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let author_ids: Vec<i32> = models.iter().map(|m| m.author_id).collect();

    let authors: HashMap<i32, users::Model> = users::Entity::find()
        .filter(users::Column::Id.is_in(author_ids.iter().copied()))
        .all(db)
        .await
        .context("load recipe authors")?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let followed = followed_authors(db, viewer, &author_ids).await?;

    let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
    let tag_rows = recipe_tags::Entity::find()
        .filter(recipe_tags::Column::RecipeId.is_in(recipe_ids.iter().copied()))
        .order_by_asc(recipe_tags::Column::TagId)
        .find_also_related(tags::Entity)
        .all(db)
        .await
        .context("load recipe tags")?;
    for (link, tag) in tag_rows {
        if let Some(tag) = tag {
            tags_by_recipe
                .entry(link.recipe_id)
                .or_default()
                .push(tag_from_model(tag)?);
        }
    }

    let mut ingredients_by_recipe: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
    let ingredient_rows = recipe_ingredients::Entity::find()
        .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids.iter().copied()))
        .order_by_asc(recipe_ingredients::Column::Position)
        .find_also_related(ingredients::Entity)
        .all(db)
        .await
        .context("load recipe ingredients")?;
    for (line, ingredient) in ingredient_rows {
        if let Some(ingredient) = ingredient {
            ingredients_by_recipe
                .entry(line.recipe_id)
                .or_default()
                .push(RecipeIngredient {
                    ingredient: ingredient_from_model(ingredient),
                    amount: line.amount,
                });
        }
    }

    let favorited = marked_recipes(db, RecipeMark::Favorite, viewer, &recipe_ids).await?;
    let in_cart = marked_recipes(db, RecipeMark::ShoppingCart, viewer, &recipe_ids).await?;

    models
        .into_iter()
        .map(|model| -> anyhow::Result<Recipe> {
            let author = authors
                .get(&model.author_id)
                .cloned()
                .with_context(|| format!("author {} of recipe {}", model.author_id, model.id))?;
            Ok(Recipe {
                id: RecipeId(model.id),
                author: profile_from_model(author, followed.contains(&model.author_id)),
                tags: tags_by_recipe.remove(&model.id).unwrap_or_default(),
                ingredients: ingredients_by_recipe.remove(&model.id).unwrap_or_default(),
                is_favorited: favorited.contains(&model.id),
                is_in_shopping_cart: in_cart.contains(&model.id),
                name: model.name,
                image: model.image,
                text: model.text,
                cooking_time: model.cooking_time,
                created_at: model.created_at,
            })
        })
        .collect()
}

// ── Recipe mark repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeMarkRepository {
    pub db: DatabaseConnection,
}

impl RecipeMarkRepository for DbRecipeMarkRepository {
    async fn add(
        &self,
        mark: RecipeMark,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, FoodgramError> {
        let now = Utc::now();
        let inserted = match mark {
            RecipeMark::Favorite => {
                favorites::Entity::insert(favorites::ActiveModel {
                    user_id: Set(user_id.0),
                    recipe_id: Set(recipe_id.0),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
            RecipeMark::ShoppingCart => {
                shopping_carts::Entity::insert(shopping_carts::ActiveModel {
                    user_id: Set(user_id.0),
                    recipe_id: Set(recipe_id.0),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([
                        shopping_carts::Column::UserId,
                        shopping_carts::Column::RecipeId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
        }
        .context("insert recipe mark")?;
        Ok(inserted > 0)
    }

    async fn remove(
        &self,
        mark: RecipeMark,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, FoodgramError> {
        let result = match mark {
            RecipeMark::Favorite => {
                favorites::Entity::delete_many()
                    .filter(favorites::Column::UserId.eq(user_id.0))
                    .filter(favorites::Column::RecipeId.eq(recipe_id.0))
                    .exec(&self.db)
                    .await
            }
            RecipeMark::ShoppingCart => {
                shopping_carts::Entity::delete_many()
                    .filter(shopping_carts::Column::UserId.eq(user_id.0))
                    .filter(shopping_carts::Column::RecipeId.eq(recipe_id.0))
                    .exec(&self.db)
                    .await
            }
        }
        .context("delete recipe mark")?;
        Ok(result.rows_affected > 0)
    }
}

impl ShoppingCartRepository for DbRecipeMarkRepository {
    async fn cart_ingredients(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CartIngredient>, FoodgramError> {
        #[derive(Debug, FromQueryResult)]
        struct CartRow {
            name: String,
            measurement_unit: String,
            amount: i64,
        }

        let rows = CartRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT i.name, i.measurement_unit, ri.amount::bigint AS amount
            FROM shopping_carts sc
            JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE sc.user_id = $1
            ORDER BY sc.created_at, sc.recipe_id, ri.position
            "#,
            [user_id.0.into()],
        ))
        .all(&self.db)
        .await
        .context("load shopping cart ingredients")?;

        Ok(rows
            .into_iter()
            .map(|row| CartIngredient {
                name: row.name,
                measurement_unit: row.measurement_unit,
                amount: row.amount,
            })
            .collect())
    }
}
