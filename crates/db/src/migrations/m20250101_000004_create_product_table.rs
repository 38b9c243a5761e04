//! Create product table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Product::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Product::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Product::Description).text().not_null())
                    .col(
                        ColumnDef::new(Product::Slug)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Product::ImageLink).string().null())
                    .col(ColumnDef::new(Product::CategoryId).string().not_null())
                    .col(ColumnDef::new(Product::FoodGroupId).string().not_null())
                    .col(ColumnDef::new(Product::Price).big_integer().not_null())
                    .col(
                        ColumnDef::new(Product::Discount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Product::OffPrice).big_integer().null())
                    .col(
                        ColumnDef::new(Product::Likes)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Product::Bookmarks)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Product::Reviews)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Product::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Product::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Products keep their category and food group ids after either is
        // deleted; reads resolve missing references to null.
        manager
            .create_index(
                Index::create()
                    .name("idx_product_category_id")
                    .table(Product::Table)
                    .col(Product::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_food_group_id")
                    .table(Product::Table)
                    .col(Product::FoodGroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_created_at")
                    .table(Product::Table)
                    .col(Product::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Product {
    Table,
    Id,
    Title,
    Description,
    Slug,
    ImageLink,
    CategoryId,
    FoodGroupId,
    Price,
    Discount,
    OffPrice,
    Likes,
    Bookmarks,
    Reviews,
    CreatedAt,
    UpdatedAt,
}
