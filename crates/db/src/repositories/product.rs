//! Product repository.

use std::sync::Arc;

use crate::entities::{Product, User, product, user};
use catalog_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order,
    QueryFilter, QueryOrder, TransactionTrait, sea_query::Expr,
};

/// Ordering for product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    /// Oldest first.
    #[default]
    Earliest,
    /// Newest first.
    Latest,
    /// Most liked first.
    Popular,
}

impl ProductSort {
    /// Parse a `sort` query value. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "latest" => Some(Self::Latest),
            "earliest" => Some(Self::Earliest),
            "popular" => Some(Self::Popular),
            _ => None,
        }
    }
}

/// Filter for product listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Full-text search over title and description.
    pub search: Option<String>,
    /// Restrict to these category IDs.
    pub category_ids: Option<Vec<String>>,
    /// Restrict to these food group IDs.
    pub food_group_ids: Option<Vec<String>>,
    pub sort: ProductSort,
}

/// Direction of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

/// Product repository for database operations.
#[derive(Clone)]
pub struct ProductRepository {
    db: Arc<DatabaseConnection>,
}

impl ProductRepository {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a product by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<product::Model>> {
        Product::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a product by slug.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<product::Model>> {
        Product::find()
            .filter(product::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List products matching `query`.
    pub async fn find_matching(&self, query: &ProductQuery) -> AppResult<Vec<product::Model>> {
        let mut condition = Condition::all();

        if let Some(search) = &query.search {
            condition = condition.add(Expr::cust_with_values(
                "to_tsvector('simple', title || ' ' || description) @@ plainto_tsquery('simple', $1)",
                [search.as_str()],
            ));
        }
        if let Some(ids) = &query.category_ids {
            condition = condition.add(product::Column::CategoryId.is_in(ids.clone()));
        }
        if let Some(ids) = &query.food_group_ids {
            condition = condition.add(product::Column::FoodGroupId.is_in(ids.clone()));
        }

        let select = Product::find().filter(condition);
        let select = match query.sort {
            ProductSort::Earliest => select.order_by_asc(product::Column::CreatedAt),
            ProductSort::Latest => select.order_by_desc(product::Column::CreatedAt),
            ProductSort::Popular => select
                .order_by(Expr::cust("jsonb_array_length(likes)"), Order::Desc)
                .order_by_asc(product::Column::CreatedAt),
        };

        select
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new product.
    pub async fn create(&self, model: product::ActiveModel) -> AppResult<product::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Set the fields present in `changes` on one product.
    ///
    /// Returns the number of rows changed.
    pub async fn update_fields(&self, id: &str, changes: product::ActiveModel) -> AppResult<u64> {
        let result = Product::update_many()
            .set(changes)
            .filter(product::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Delete a product.
    ///
    /// Returns the number of rows deleted.
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = Product::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    // ==================== Like Operations ====================

    /// Add or remove a like on both the product and the user.
    ///
    /// Both writes run in one transaction and only change rows whose
    /// membership actually flips. Returns `false`, leaving both rows
    /// untouched, when either write changed nothing.
    pub async fn apply_like(
        &self,
        product_id: &str,
        user_id: &str,
        action: LikeAction,
    ) -> AppResult<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let applied = Self::apply_like_in(&txn, product_id, user_id, action)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let finished = if applied {
            txn.commit().await
        } else {
            txn.rollback().await
        };
        finished.map_err(|e| AppError::Database(e.to_string()))?;

        Ok(applied)
    }

    async fn apply_like_in<C: sea_orm::ConnectionTrait>(
        conn: &C,
        product_id: &str,
        user_id: &str,
        action: LikeAction,
    ) -> Result<bool, DbErr> {
        let (likes_expr, liked_products_expr, member) = match action {
            LikeAction::Like => (
                "likes || jsonb_build_array(CAST($1 AS text))",
                "liked_products || jsonb_build_array(CAST($1 AS text))",
                false,
            ),
            LikeAction::Unlike => (
                "likes - CAST($1 AS text)",
                "liked_products - CAST($1 AS text)",
                true,
            ),
        };

        let product_update = Product::update_many()
            .col_expr(
                product::Column::Likes,
                Expr::cust_with_values(likes_expr, [user_id]),
            )
            .filter(product::Column::Id.eq(product_id))
            .filter(membership("likes", user_id, member))
            .exec(conn)
            .await?;

        if product_update.rows_affected == 0 {
            return Ok(false);
        }

        let user_update = User::update_many()
            .col_expr(
                user::Column::LikedProducts,
                Expr::cust_with_values(liked_products_expr, [product_id]),
            )
            .filter(user::Column::Id.eq(user_id))
            .filter(membership("liked_products", product_id, member))
            .exec(conn)
            .await?;

        Ok(user_update.rows_affected > 0)
    }
}

/// Condition on whether the JSON array `column` contains `value`.
fn membership(column: &str, value: &str, contains: bool) -> sea_orm::sea_query::SimpleExpr {
    let test = format!("{column} @> jsonb_build_array(CAST($1 AS text))");
    let sql = if contains { test } else { format!("NOT ({test})") };
    Expr::cust_with_values(sql, [value])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};
    use serde_json::json;

    fn create_test_product(id: &str, likes: &[&str]) -> product::Model {
        product::Model {
            id: id.to_string(),
            title: "Brown rice".to_string(),
            description: "Whole grain rice".to_string(),
            slug: "brown-rice".to_string(),
            image_link: None,
            category_id: "cat1".to_string(),
            food_group_id: "fg1".to_string(),
            price: 1200,
            discount: 0,
            off_price: None,
            likes: json!(likes),
            bookmarks: json!([]),
            reviews: json!([]),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(ProductSort::parse("latest"), Some(ProductSort::Latest));
        assert_eq!(ProductSort::parse("earliest"), Some(ProductSort::Earliest));
        assert_eq!(ProductSort::parse("popular"), Some(ProductSort::Popular));
        assert_eq!(ProductSort::parse("cheapest"), None);
        assert_eq!(ProductSort::default(), ProductSort::Earliest);
    }

    #[test]
    fn test_like_ids() {
        let product = create_test_product("p1", &["u1", "u2"]);
        assert_eq!(product.like_ids(), vec!["u1", "u2"]);
    }

    #[tokio::test]
    async fn test_find_by_slug() {
        let product = create_test_product("p1", &[]);
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[product]])
                .into_connection(),
        );

        let repo = ProductRepository::new(db);
        let found = repo.find_by_slug("brown-rice").await.unwrap();
        assert_eq!(found.unwrap().id, "p1");
    }

    #[tokio::test]
    async fn test_find_matching_popular_orders_by_like_count() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![
                    create_test_product("p2", &["u1", "u2"]),
                    create_test_product("p1", &["u1"]),
                ]])
                .into_connection(),
        );

        let repo = ProductRepository::new(db.clone());
        let query = ProductQuery {
            search: Some("rice".to_string()),
            category_ids: Some(vec!["cat1".to_string()]),
            sort: ProductSort::Popular,
            ..Default::default()
        };
        let products = repo.find_matching(&query).await.unwrap();
        assert_eq!(products.len(), 2);

        drop(repo);
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("plainto_tsquery('simple', $1)"));
        assert!(sql.contains(r#"\"category_id\" IN"#));
        assert!(sql.contains("jsonb_array_length(likes) DESC"));
    }

    #[tokio::test]
    async fn test_update_fields_and_delete_report_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(1), exec(0)])
                .into_connection(),
        );

        let repo = ProductRepository::new(db);
        let changes = product::ActiveModel {
            discount: Set(10),
            off_price: Set(Some(1080)),
            ..Default::default()
        };
        assert_eq!(repo.update_fields("p1", changes).await.unwrap(), 1);
        assert_eq!(repo.delete("p1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_apply_like_updates_both_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(1), exec(1)])
                .into_connection(),
        );

        let repo = ProductRepository::new(db.clone());
        let applied = repo.apply_like("p1", "u1", LikeAction::Like).await.unwrap();
        assert!(applied);

        drop(repo);
        let log = format!("{:?}", Arc::try_unwrap(db).unwrap().into_transaction_log());
        assert!(log.contains("likes || jsonb_build_array(CAST($1 AS text))"));
        assert!(log.contains("NOT (likes @> jsonb_build_array(CAST($3 AS text)))"));
        assert!(log.contains("NOT (liked_products @> jsonb_build_array(CAST($3 AS text)))"));
        assert!(!log.contains("CAST(? AS text)"));
    }

    #[tokio::test]
    async fn test_apply_unlike_pulls_from_both_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(1), exec(1)])
                .into_connection(),
        );

        let repo = ProductRepository::new(db.clone());
        let applied = repo
            .apply_like("p1", "u1", LikeAction::Unlike)
            .await
            .unwrap();
        assert!(applied);

        drop(repo);
        let log = format!("{:?}", Arc::try_unwrap(db).unwrap().into_transaction_log());
        assert!(log.contains("likes - CAST($1 AS text)"));
        assert!(log.contains("liked_products - CAST($1 AS text)"));
        assert!(log.contains("likes @> jsonb_build_array(CAST($3 AS text))"));
    }

    #[tokio::test]
    async fn test_apply_like_stops_when_product_unchanged() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(0)])
                .into_connection(),
        );

        let repo = ProductRepository::new(db);
        let applied = repo
            .apply_like("p1", "u1", LikeAction::Unlike)
            .await
            .unwrap();
        assert!(!applied);
    }

    #[tokio::test]
    async fn test_apply_like_fails_when_user_unchanged() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(1), exec(0)])
                .into_connection(),
        );

        let repo = ProductRepository::new(db);
        let applied = repo.apply_like("p1", "u1", LikeAction::Like).await.unwrap();
        assert!(!applied);
    }
}
