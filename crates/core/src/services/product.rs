//! Product service.

use std::collections::HashMap;

use catalog_common::{
    AppError, AppResult, IdGenerator, copy_object, delete_invalid_property_in_object, is_valid_id,
};
use catalog_db::entities::{category, food_group, product, user};
use catalog_db::repositories::{
    CategoryRepository, FoodGroupRepository, LikeAction, ProductQuery, ProductRepository,
    ProductSort,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use serde::Deserialize;
use serde_json::{Value, json};
use validator::{Validate, ValidationError};

/// Fields the generic update path never writes.
pub const PROTECTED_FIELDS: [&str; 3] = ["bookmarks", "likes", "reviews"];

/// Input for creating a product.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    #[validate(length(
        min = 3,
        max = 100,
        message = "Product title must be between 3 and 100 characters"
    ))]
    pub title: String,

    #[validate(length(
        min = 3,
        max = 1000,
        message = "Product description must be between 3 and 1000 characters"
    ))]
    pub description: String,

    #[validate(length(
        min = 3,
        max = 100,
        message = "Product slug must be between 3 and 100 characters"
    ))]
    pub slug: String,

    pub image_link: Option<String>,

    #[validate(custom(function = "validate_id", message = "Category ID is not valid"))]
    pub category: String,

    #[validate(custom(function = "validate_id", message = "Food group ID is not valid"))]
    pub food_group: String,

    #[validate(range(min = 0, message = "Product price cannot be negative"))]
    pub price: i64,

    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100"))]
    pub discount: i32,

    #[validate(range(min = 0, message = "Discounted price cannot be negative"))]
    pub off_price: Option<i64>,
}

/// Partial product update. Protected fields have no counterpart here and
/// unknown keys are ignored.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    #[validate(length(
        min = 3,
        max = 100,
        message = "Product title must be between 3 and 100 characters"
    ))]
    pub title: Option<String>,

    #[validate(length(
        min = 3,
        max = 1000,
        message = "Product description must be between 3 and 1000 characters"
    ))]
    pub description: Option<String>,

    #[validate(length(
        min = 3,
        max = 100,
        message = "Product slug must be between 3 and 100 characters"
    ))]
    pub slug: Option<String>,

    pub image_link: Option<String>,

    #[validate(custom(function = "validate_id", message = "Category ID is not valid"))]
    pub category: Option<String>,

    #[validate(custom(function = "validate_id", message = "Food group ID is not valid"))]
    pub food_group: Option<String>,

    #[validate(range(min = 0, message = "Product price cannot be negative"))]
    pub price: Option<i64>,

    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100"))]
    pub discount: Option<i32>,

    #[validate(range(min = 0, message = "Discounted price cannot be negative"))]
    pub off_price: Option<i64>,
}

impl UpdateProductInput {
    fn into_active_model(self) -> Option<product::ActiveModel> {
        let mut changes = <product::ActiveModel as ActiveModelTrait>::default();

        if let Some(title) = self.title {
            changes.title = Set(title);
        }
        if let Some(description) = self.description {
            changes.description = Set(description);
        }
        if let Some(slug) = self.slug {
            changes.slug = Set(slug);
        }
        if let Some(link) = self.image_link {
            changes.image_link = Set(Some(link));
        }
        if let Some(category) = self.category {
            changes.category_id = Set(category);
        }
        if let Some(food_group) = self.food_group {
            changes.food_group_id = Set(food_group);
        }
        if let Some(price) = self.price {
            changes.price = Set(price);
        }
        if let Some(discount) = self.discount {
            changes.discount = Set(discount);
        }
        if let Some(off_price) = self.off_price {
            changes.off_price = Set(Some(off_price));
        }

        if !changes.is_changed() {
            return None;
        }
        changes.updated_at = Set(Some(Utc::now().into()));
        Some(changes)
    }
}

/// Input for changing a product's discount.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DiscountInput {
    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100"))]
    pub discount: i32,

    #[validate(range(min = 0, message = "Discounted price cannot be negative"))]
    pub off_price: i64,
}

/// Query parameters for product listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    pub search: Option<String>,
    /// Comma-separated category English titles.
    pub category: Option<String>,
    /// Comma-separated food group English titles.
    pub food_group: Option<String>,
    pub sort: Option<String>,
}

/// A product as seen by one viewer in a listing.
#[derive(Debug, Clone)]
pub struct ProductListing {
    pub product: product::Model,
    pub category: Option<category::Model>,
    pub food_group: Option<food_group::Model>,
    pub likes_count: usize,
    pub is_liked: bool,
}

/// A product with its category resolved.
#[derive(Debug, Clone)]
pub struct ProductWithCategory {
    pub product: product::Model,
    pub category: Option<category::Model>,
}

/// Result of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Liked,
    Unliked,
}

impl LikeOutcome {
    /// Message shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Liked => "Thanks for your like",
            Self::Unliked => "Your like was removed",
        }
    }
}

fn validate_id(value: &str) -> Result<(), ValidationError> {
    if is_valid_id(value) {
        Ok(())
    } else {
        Err(ValidationError::new("id"))
    }
}

/// Split a comma-separated list of keys, dropping blanks.
fn split_keys(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect()
}

/// Service for the product catalog.
#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    category_repo: CategoryRepository,
    food_group_repo: FoodGroupRepository,
    id_gen: IdGenerator,
}

impl ProductService {
    /// Create a new product service.
    #[must_use]
    pub const fn new(
        product_repo: ProductRepository,
        category_repo: CategoryRepository,
        food_group_repo: FoodGroupRepository,
    ) -> Self {
        Self {
            product_repo,
            category_repo,
            food_group_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Fetch a product, rejecting malformed IDs before touching the store.
    pub async fn find_product_by_id(&self, id: &str) -> AppResult<product::Model> {
        if !is_valid_id(id) {
            return Err(AppError::BadRequest(
                "The sent product ID is incorrect".to_string(),
            ));
        }

        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("No product found.".to_string()))
    }

    /// Create a new product.
    pub async fn create(&self, input: CreateProductInput) -> AppResult<product::Model> {
        input.validate()?;

        let model = product::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            description: Set(input.description),
            slug: Set(input.slug),
            image_link: Set(input.image_link),
            category_id: Set(input.category),
            food_group_id: Set(input.food_group),
            price: Set(input.price),
            discount: Set(input.discount),
            off_price: Set(input.off_price),
            likes: Set(json!([])),
            bookmarks: Set(json!([])),
            reviews: Set(json!([])),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        let created = self.product_repo.create(model).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to insert product");
            AppError::Internal("Product was not registered".to_string())
        })?;

        tracing::info!(id = %created.id, slug = %created.slug, "Product created");
        Ok(created)
    }

    /// List products for a viewer.
    pub async fn list(
        &self,
        params: ProductListParams,
        viewer_id: Option<&str>,
    ) -> AppResult<Vec<ProductListing>> {
        let mut query = ProductQuery {
            search: params
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            sort: params
                .sort
                .as_deref()
                .and_then(ProductSort::parse)
                .unwrap_or_default(),
            ..Default::default()
        };

        if let Some(keys) = params.category.as_deref() {
            let mut ids = Vec::new();
            for key in split_keys(keys) {
                if let Some(found) = self.category_repo.find_by_english_title(key).await? {
                    ids.push(found.id);
                }
            }
            query.category_ids = Some(ids);
        }

        if let Some(keys) = params.food_group.as_deref() {
            let mut ids = Vec::new();
            for key in split_keys(keys) {
                if let Some(found) = self.food_group_repo.find_by_english_title(key).await? {
                    ids.push(found.id);
                }
            }
            query.food_group_ids = Some(ids);
        }

        let products = self.product_repo.find_matching(&query).await?;
        if products.is_empty() {
            return Ok(vec![]);
        }

        let categories = self.categories_for(&products).await?;
        let food_groups = self.food_groups_for(&products).await?;

        Ok(products
            .into_iter()
            .map(|product| {
                let likes = product.like_ids();
                ProductListing {
                    category: categories.get(&product.category_id).cloned(),
                    food_group: food_groups.get(&product.food_group_id).cloned(),
                    likes_count: likes.len(),
                    is_liked: viewer_id.is_some_and(|v| likes.iter().any(|id| id == v)),
                    product,
                }
            })
            .collect())
    }

    async fn categories_for(
        &self,
        products: &[product::Model],
    ) -> AppResult<HashMap<String, category::Model>> {
        let mut ids: Vec<String> = products.iter().map(|p| p.category_id.clone()).collect();
        ids.sort();
        ids.dedup();

        Ok(self
            .category_repo
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect())
    }

    async fn food_groups_for(
        &self,
        products: &[product::Model],
    ) -> AppResult<HashMap<String, food_group::Model>> {
        let mut ids: Vec<String> = products.iter().map(|p| p.food_group_id.clone()).collect();
        ids.sort();
        ids.dedup();

        Ok(self
            .food_group_repo
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|g| (g.id.clone(), g))
            .collect())
    }

    async fn with_category(&self, product: product::Model) -> AppResult<ProductWithCategory> {
        let category = self.category_repo.find_by_id(&product.category_id).await?;
        Ok(ProductWithCategory { product, category })
    }

    /// Get a product by ID with its category.
    pub async fn get_by_id(&self, id: &str) -> AppResult<ProductWithCategory> {
        let product = self.find_product_by_id(id).await?;
        self.with_category(product).await
    }

    /// Get a product by slug with its category.
    pub async fn get_by_slug(&self, slug: &str) -> AppResult<ProductWithCategory> {
        let product = self.product_repo.find_by_slug(slug).await?.ok_or_else(|| {
            AppError::NotFound("Product with these specifications was not found".to_string())
        })?;
        self.with_category(product).await
    }

    /// Set a product's discount and discounted price.
    pub async fn change_discount_status(&self, id: &str, input: DiscountInput) -> AppResult<()> {
        self.find_product_by_id(id).await?;
        input.validate()?;

        let changes = product::ActiveModel {
            discount: Set(input.discount),
            off_price: Set(Some(input.off_price)),
            updated_at: Set(Some(Utc::now().into())),
            ..Default::default()
        };

        let updated = self.product_repo.update_fields(id, changes).await?;
        if updated == 0 {
            return Err(AppError::BadRequest(
                "Change was not made, please try again".to_string(),
            ));
        }

        Ok(())
    }

    /// Delete a product.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.find_product_by_id(id).await?;

        let deleted = self.product_repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::Internal(
                "Product deletion was not performed".to_string(),
            ));
        }

        tracing::info!(id = %id, "Product deleted");
        Ok(())
    }

    /// Apply a partial update from a loosely-typed body.
    ///
    /// Protected fields and empty values are stripped before validation.
    pub async fn update(&self, id: &str, body: &Value) -> AppResult<()> {
        self.find_product_by_id(id).await?;

        let mut data = copy_object(body)?;
        delete_invalid_property_in_object(&mut data, &PROTECTED_FIELDS);

        let input: UpdateProductInput = serde_json::from_value(Value::Object(data))
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        input.validate()?;

        let Some(changes) = input.into_active_model() else {
            return Err(AppError::Internal(
                "Product update was not performed".to_string(),
            ));
        };

        let updated = self.product_repo.update_fields(id, changes).await?;
        if updated == 0 {
            return Err(AppError::Internal(
                "Product update was not performed".to_string(),
            ));
        }

        Ok(())
    }

    /// Like the product, or remove the like if the user already liked it.
    pub async fn toggle_like(&self, id: &str, user: &user::Model) -> AppResult<LikeOutcome> {
        let product = self.find_product_by_id(id).await?;
        let already_liked = product.like_ids().iter().any(|liker| liker == &user.id);

        let (action, outcome) = if already_liked {
            (LikeAction::Unlike, LikeOutcome::Unliked)
        } else {
            (LikeAction::Like, LikeOutcome::Liked)
        };

        if !self
            .product_repo
            .apply_like(&product.id, &user.id, action)
            .await?
        {
            return Err(AppError::BadRequest("Operation was unsuccessful.".to_string()));
        }

        tracing::debug!(product_id = %product.id, user_id = %user.id, ?outcome, "Like toggled");
        Ok(outcome)
    }
}
