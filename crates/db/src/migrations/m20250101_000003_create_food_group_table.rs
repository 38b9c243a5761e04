//! Create food_group table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FoodGroup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FoodGroup::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FoodGroup::Title).string_len(100).not_null())
                    .col(
                        ColumnDef::new(FoodGroup::EnglishTitle)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FoodGroup::Description).text().not_null())
                    .col(ColumnDef::new(FoodGroup::Type).string_len(16).not_null())
                    .col(ColumnDef::new(FoodGroup::ParentId).string().null())
                    .col(ColumnDef::new(FoodGroup::CategoryId).string().not_null())
                    .col(
                        ColumnDef::new(FoodGroup::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoodGroup::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Category and parent links are plain ids, not foreign keys. Children
        // are removed together with their parent and orphans are tolerated.
        manager
            .create_index(
                Index::create()
                    .name("idx_food_group_english_title_unique")
                    .table(FoodGroup::Table)
                    .col(FoodGroup::EnglishTitle)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_food_group_parent_id")
                    .table(FoodGroup::Table)
                    .col(FoodGroup::ParentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_food_group_category_id")
                    .table(FoodGroup::Table)
                    .col(FoodGroup::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FoodGroup::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum FoodGroup {
    Table,
    Id,
    Title,
    EnglishTitle,
    Description,
    Type,
    ParentId,
    CategoryId,
    CreatedAt,
    UpdatedAt,
}
