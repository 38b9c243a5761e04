//! Food group endpoints.

use std::collections::HashMap;

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use catalog_common::AppResult;
use catalog_core::{CreateFoodGroupInput, UpdateFoodGroupInput};
use catalog_db::entities::food_group;
use serde::Serialize;

use crate::{
    extractors::JsonBody,
    middleware::AppState,
    response::{ApiResponse, MessageBody},
};

// ==================== Response Types ====================

/// Food group response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodGroupResponse {
    pub id: String,
    pub title: String,
    pub english_title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub parent: Option<String>,
    pub category: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<food_group::Model> for FoodGroupResponse {
    fn from(g: food_group::Model) -> Self {
        Self {
            id: g.id,
            title: g.title,
            english_title: g.english_title,
            description: g.description,
            kind: g.kind.as_str(),
            parent: g.parent_id,
            category: g.category_id,
            created_at: g.created_at.to_rfc3339(),
            updated_at: g.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodGroupListBody {
    pub food_group: Vec<FoodGroupResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodGroupBody {
    pub food_group: FoodGroupResponse,
}

// ==================== Handlers ====================

async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<ApiResponse<FoodGroupListBody>> {
    let groups = state.food_group_service.list(&params).await?;

    Ok(ApiResponse::ok(FoodGroupListBody {
        food_group: groups.into_iter().map(Into::into).collect(),
    }))
}

async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateFoodGroupInput>,
) -> AppResult<ApiResponse<MessageBody>> {
    state.food_group_service.create(input).await?;

    Ok(ApiResponse::created(MessageBody {
        message: "Category added successfully".to_string(),
    }))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<FoodGroupBody>> {
    let group = state.food_group_service.get_by_id(&id).await?;

    Ok(ApiResponse::ok(FoodGroupBody {
        food_group: group.into(),
    }))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateFoodGroupInput>,
) -> AppResult<ApiResponse<MessageBody>> {
    state.food_group_service.update(&id, input).await?;
    Ok(ApiResponse::message("Update was successful"))
}

async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<MessageBody>> {
    state.food_group_service.delete(&id).await?;
    Ok(ApiResponse::message("Category deletion was successful"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).patch(update).delete(delete))
}
