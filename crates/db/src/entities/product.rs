//! Product entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(unique)]
    pub slug: String,

    #[sea_orm(nullable)]
    pub image_link: Option<String>,

    #[sea_orm(indexed)]
    #[serde(rename = "category")]
    pub category_id: String,

    #[sea_orm(indexed)]
    #[serde(rename = "foodGroup")]
    pub food_group_id: String,

    /// Price in the smallest currency unit
    pub price: i64,

    /// Discount percentage
    #[sea_orm(default_value = 0)]
    pub discount: i32,

    #[sea_orm(nullable)]
    pub off_price: Option<i64>,

    /// User IDs that liked this product (JSON array of strings)
    #[sea_orm(column_type = "JsonBinary")]
    pub likes: Json,

    /// User IDs that bookmarked this product (JSON array of strings)
    #[sea_orm(column_type = "JsonBinary")]
    pub bookmarks: Json,

    /// Embedded reviews (JSON array of objects)
    #[sea_orm(column_type = "JsonBinary")]
    pub reviews: Json,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// User IDs that liked this product.
    #[must_use]
    pub fn like_ids(&self) -> Vec<String> {
        serde_json::from_value(self.likes.clone()).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,

    #[sea_orm(
        belongs_to = "super::food_group::Entity",
        from = "Column::FoodGroupId",
        to = "super::food_group::Column::Id"
    )]
    FoodGroup,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::food_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoodGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
