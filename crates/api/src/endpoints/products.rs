//! Product endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use catalog_common::AppResult;
use catalog_core::{
    CreateProductInput, DiscountInput, ProductListParams, ProductListing, ProductWithCategory,
};
use catalog_db::entities::{category, food_group, product};
use serde::Serialize;
use serde_json::Value;

use crate::{
    extractors::{AuthUser, JsonBody, MaybeAuthUser},
    middleware::AppState,
    response::{ApiResponse, MessageBody},
};

// ==================== Response Types ====================

/// Category reference inside a listing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub title: String,
    pub english_title: String,
}

impl From<category::Model> for CategorySummary {
    fn from(c: category::Model) -> Self {
        Self {
            id: c.id,
            title: c.title,
            english_title: c.english_title,
        }
    }
}

/// Food group reference inside a listing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodGroupSummary {
    pub id: String,
    pub title: String,
    pub english_title: String,
}

impl From<food_group::Model> for FoodGroupSummary {
    fn from(g: food_group::Model) -> Self {
        Self {
            id: g.id,
            title: g.title,
            english_title: g.english_title,
        }
    }
}

/// Category reference on a single product.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub english_title: String,
}

impl From<category::Model> for CategoryDetail {
    fn from(c: category::Model) -> Self {
        Self {
            id: c.id,
            title: c.title,
            icon: c.icon,
            english_title: c.english_title,
        }
    }
}

/// A category either as a bare ID or resolved.
#[derive(Serialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(String),
    Populated(Option<CategoryDetail>),
}

/// Product listing item. The raw likes and the reviews are never exposed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub image_link: Option<String>,
    pub category: Option<CategorySummary>,
    pub food_group: Option<FoodGroupSummary>,
    pub price: i64,
    pub discount: i32,
    pub off_price: Option<i64>,
    pub bookmarks: Value,
    pub likes_count: usize,
    pub is_liked: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<ProductListing> for ProductListItem {
    fn from(listing: ProductListing) -> Self {
        let p = listing.product;
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            slug: p.slug,
            image_link: p.image_link,
            category: listing.category.map(Into::into),
            food_group: listing.food_group.map(Into::into),
            price: p.price,
            discount: p.discount,
            off_price: p.off_price,
            bookmarks: p.bookmarks,
            likes_count: listing.likes_count,
            is_liked: listing.is_liked,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Full product response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub image_link: Option<String>,
    pub category: CategoryRef,
    pub food_group: String,
    pub price: i64,
    pub discount: i32,
    pub off_price: Option<i64>,
    pub likes: Value,
    pub bookmarks: Value,
    pub reviews: Value,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl ProductResponse {
    fn new(p: product::Model, category: CategoryRef) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            slug: p.slug,
            image_link: p.image_link,
            category,
            food_group: p.food_group_id,
            price: p.price,
            discount: p.discount,
            off_price: p.off_price,
            likes: p.likes,
            bookmarks: p.bookmarks,
            reviews: p.reviews,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

impl From<product::Model> for ProductResponse {
    fn from(p: product::Model) -> Self {
        let category = CategoryRef::Id(p.category_id.clone());
        Self::new(p, category)
    }
}

impl From<ProductWithCategory> for ProductResponse {
    fn from(found: ProductWithCategory) -> Self {
        let category = CategoryRef::Populated(found.category.map(Into::into));
        Self::new(found.product, category)
    }
}

#[derive(Serialize)]
pub struct CreatedProductBody {
    pub message: String,
    pub product: ProductResponse,
}

#[derive(Serialize)]
pub struct ProductListBody {
    pub products: Vec<ProductListItem>,
}

#[derive(Serialize)]
pub struct ProductBody {
    pub product: ProductResponse,
}

// ==================== Handlers ====================

async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateProductInput>,
) -> AppResult<ApiResponse<CreatedProductBody>> {
    let product = state.product_service.create(input).await?;

    Ok(ApiResponse::created(CreatedProductBody {
        message: "Product successfully created".to_string(),
        product: product.into(),
    }))
}

async fn list(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Query(params): Query<ProductListParams>,
) -> AppResult<ApiResponse<ProductListBody>> {
    let viewer_id = viewer.as_ref().map(|u| u.id.as_str());
    let listings = state.product_service.list(params, viewer_id).await?;

    Ok(ApiResponse::ok(ProductListBody {
        products: listings.into_iter().map(Into::into).collect(),
    }))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ProductBody>> {
    let found = state.product_service.get_by_id(&id).await?;
    Ok(ApiResponse::ok(ProductBody {
        product: found.into(),
    }))
}

async fn show_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<ApiResponse<ProductBody>> {
    let found = state.product_service.get_by_slug(&slug).await?;
    Ok(ApiResponse::ok(ProductBody {
        product: found.into(),
    }))
}

async fn change_discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<DiscountInput>,
) -> AppResult<ApiResponse<MessageBody>> {
    state
        .product_service
        .change_discount_status(&id, input)
        .await?;
    Ok(ApiResponse::message("Product discount status activated"))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<ApiResponse<MessageBody>> {
    state.product_service.update(&id, &body).await?;
    Ok(ApiResponse::message("Product successfully updated"))
}

async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<MessageBody>> {
    state.product_service.delete(&id).await?;
    Ok(ApiResponse::message("Product successfully deleted"))
}

async fn toggle_like(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<MessageBody>> {
    let outcome = state.product_service.toggle_like(&id, &user).await?;
    Ok(ApiResponse::message(outcome.message()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/slug/{slug}", get(show_by_slug))
        .route("/{id}", get(show).patch(update).delete(delete))
        .route("/{id}/discount", patch(change_discount))
        .route("/{id}/like", post(toggle_like))
}
