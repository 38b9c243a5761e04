//! Food group repository.

use std::sync::Arc;

use crate::entities::{FoodGroup, food_group};
use catalog_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

/// Equality filter over food group fields. `None` fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodGroupFilter {
    pub title: Option<String>,
    pub english_title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<food_group::FoodGroupType>,
    pub parent_id: Option<String>,
    pub category_id: Option<String>,
}

impl FoodGroupFilter {
    fn into_condition(self) -> Condition {
        let mut condition = Condition::all();
        if let Some(title) = self.title {
            condition = condition.add(food_group::Column::Title.eq(title));
        }
        if let Some(english_title) = self.english_title {
            condition = condition.add(food_group::Column::EnglishTitle.eq(english_title));
        }
        if let Some(description) = self.description {
            condition = condition.add(food_group::Column::Description.eq(description));
        }
        if let Some(kind) = self.kind {
            condition = condition.add(food_group::Column::Kind.eq(kind));
        }
        if let Some(parent_id) = self.parent_id {
            condition = condition.add(food_group::Column::ParentId.eq(parent_id));
        }
        if let Some(category_id) = self.category_id {
            condition = condition.add(food_group::Column::CategoryId.eq(category_id));
        }
        condition
    }
}

/// Food group repository for database operations.
#[derive(Clone)]
pub struct FoodGroupRepository {
    db: Arc<DatabaseConnection>,
}

impl FoodGroupRepository {
    /// Create a new food group repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a food group by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<food_group::Model>> {
        FoodGroup::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a food group by its English title.
    pub async fn find_by_english_title(
        &self,
        english_title: &str,
    ) -> AppResult<Option<food_group::Model>> {
        FoodGroup::find()
            .filter(food_group::Column::EnglishTitle.eq(english_title))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find food groups by IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<food_group::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        FoodGroup::find()
            .filter(food_group::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List food groups matching every field set in `filter`.
    pub async fn find_matching(&self, filter: FoodGroupFilter) -> AppResult<Vec<food_group::Model>> {
        FoodGroup::find()
            .filter(filter.into_condition())
            .order_by_asc(food_group::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new food group.
    pub async fn create(&self, model: food_group::ActiveModel) -> AppResult<food_group::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Set the fields present in `changes` on one food group.
    ///
    /// Returns the number of rows changed.
    pub async fn update_fields(
        &self,
        id: &str,
        changes: food_group::ActiveModel,
    ) -> AppResult<u64> {
        let result = FoodGroup::update_many()
            .set(changes)
            .filter(food_group::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Delete a food group together with its direct children.
    ///
    /// Returns the number of rows deleted.
    pub async fn delete_with_children(&self, id: &str) -> AppResult<u64> {
        let result = FoodGroup::delete_many()
            .filter(
                Condition::any()
                    .add(food_group::Column::Id.eq(id))
                    .add(food_group::Column::ParentId.eq(id)),
            )
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn create_test_group(id: &str, english_title: &str, parent_id: Option<&str>) -> food_group::Model {
        food_group::Model {
            id: id.to_string(),
            title: "Vegetables".to_string(),
            english_title: english_title.to_string(),
            description: "Fresh vegetables".to_string(),
            kind: food_group::FoodGroupType::FoodGroup,
            parent_id: parent_id.map(ToString::to_string),
            category_id: "cat1".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_english_title() {
        let group = create_test_group("fg1", "vegetables", None);
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[group]])
                .into_connection(),
        );

        let repo = FoodGroupRepository::new(db);
        let result = repo.find_by_english_title("vegetables").await.unwrap();
        assert_eq!(result.unwrap().id, "fg1");
    }

    #[tokio::test]
    async fn test_find_matching_with_filter() {
        let groups = vec![
            create_test_group("fg1", "roots", Some("parent")),
            create_test_group("fg2", "leaves", Some("parent")),
        ];
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([groups])
                .into_connection(),
        );

        let repo = FoodGroupRepository::new(db.clone());
        let filter = FoodGroupFilter {
            parent_id: Some("parent".to_string()),
            ..Default::default()
        };
        let result = repo.find_matching(filter).await.unwrap();
        assert_eq!(result.len(), 2);

        drop(repo);
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains(r#"\"parent_id\" = $1"#));
    }

    #[tokio::test]
    async fn test_delete_with_children_matches_parent() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 3,
                }])
                .into_connection(),
        );

        let repo = FoodGroupRepository::new(db.clone());
        let deleted = repo.delete_with_children("fg1").await.unwrap();
        assert_eq!(deleted, 3);

        drop(repo);
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains(r#"DELETE FROM \"food_group\""#));
        assert!(sql.contains(r#"\"parent_id\" = $2"#));
    }

    #[tokio::test]
    async fn test_update_fields_reports_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = FoodGroupRepository::new(db);
        let changes = food_group::ActiveModel {
            title: Set("Greens".to_string()),
            ..Default::default()
        };
        assert_eq!(repo.update_fields("missing", changes).await.unwrap(), 0);
    }
}
