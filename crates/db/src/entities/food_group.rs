//! Food group entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// What a food group node categorises.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "camelCase")]
pub enum FoodGroupType {
    #[sea_orm(string_value = "foodGroup")]
    FoodGroup,
    #[sea_orm(string_value = "product")]
    Product,
    #[sea_orm(string_value = "post")]
    Post,
    #[sea_orm(string_value = "comment")]
    Comment,
    #[sea_orm(string_value = "ticket")]
    Ticket,
}

impl FoodGroupType {
    /// Parse the wire representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "foodGroup" => Some(Self::FoodGroup),
            "product" => Some(Self::Product),
            "post" => Some(Self::Post),
            "comment" => Some(Self::Comment),
            "ticket" => Some(Self::Ticket),
            _ => None,
        }
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FoodGroup => "foodGroup",
            Self::Product => "product",
            Self::Post => "post",
            Self::Comment => "comment",
            Self::Ticket => "ticket",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "food_group")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Localized title
    pub title: String,

    /// English title, unique across food groups
    #[sea_orm(unique)]
    pub english_title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: FoodGroupType,

    /// Parent food group (one level of nesting is cascaded on delete)
    #[sea_orm(indexed, nullable)]
    #[serde(rename = "parent")]
    pub parent_id: Option<String>,

    #[sea_orm(indexed)]
    #[serde(rename = "category")]
    pub category_id: String,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
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
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id"
    )]
    Parent,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
