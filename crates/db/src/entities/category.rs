//! Category entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    /// Human-readable key used in product listing filters
    #[sea_orm(unique)]
    pub english_title: String,

    #[sea_orm(nullable)]
    pub icon: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::food_group::Entity")]
    FoodGroup,
    #[sea_orm(has_many = "super::product::Entity")]
    Product,
}

impl Related<super::food_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoodGroup.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
