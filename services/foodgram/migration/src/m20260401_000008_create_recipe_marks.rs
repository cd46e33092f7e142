use sea_orm_migration::prelude::*;

/// Favorites and shopping carts share one shape: a (user, recipe) pair.
#[derive(DeriveMigrationName)]
pub struct Migration;

fn mark_table(table: RecipeMarks) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(RecipeMarks::UserId).integer().not_null())
        .col(ColumnDef::new(RecipeMarks::RecipeId).integer().not_null())
        .col(
            ColumnDef::new(RecipeMarks::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .primary_key(
            Index::create()
                .col(RecipeMarks::UserId)
                .col(RecipeMarks::RecipeId),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, RecipeMarks::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, RecipeMarks::RecipeId)
                .to(Recipes::Table, Recipes::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(mark_table(RecipeMarks::Favorites))
            .await?;
        manager
            .create_table(mark_table(RecipeMarks::ShoppingCarts))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeMarks::ShoppingCarts).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecipeMarks::Favorites).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum RecipeMarks {
    Favorites,
    ShoppingCarts,
    UserId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
