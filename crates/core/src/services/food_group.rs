//! Food group service.

use std::collections::HashMap;

use catalog_common::{AppError, AppResult, IdGenerator, is_valid_id};
use catalog_db::entities::food_group::{self, FoodGroupType};
use catalog_db::repositories::{FoodGroupFilter, FoodGroupRepository};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Types accepted when a food group is created.
const CREATE_TYPES: [FoodGroupType; 4] = [
    FoodGroupType::FoodGroup,
    FoodGroupType::Post,
    FoodGroupType::Comment,
    FoodGroupType::Ticket,
];

/// Types accepted when a food group is updated.
const UPDATE_TYPES: [FoodGroupType; 4] = [
    FoodGroupType::Product,
    FoodGroupType::Post,
    FoodGroupType::Comment,
    FoodGroupType::Ticket,
];

const NOT_FOUND: &str = "A category with this title does not exist.";

/// Input for creating a food group.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFoodGroupInput {
    #[validate(length(
        min = 3,
        max = 100,
        message = "Category title must be between 3 and 100 characters"
    ))]
    pub title: String,

    #[validate(length(
        min = 3,
        max = 100,
        message = "Category English title must be between 3 and 100 characters"
    ))]
    pub english_title: String,

    #[validate(length(
        min = 3,
        max = 200,
        message = "Category description must be between 3 and 200 characters"
    ))]
    pub description: String,

    #[serde(rename = "type")]
    #[validate(custom(function = "validate_create_type", message = "Category type is not valid"))]
    pub kind: String,

    #[validate(custom(function = "validate_id", message = "Category ID is not valid"))]
    pub category: String,

    /// Parent food group. An empty string means no parent.
    #[serde(default, alias = "foodParentId")]
    #[validate(custom(function = "validate_parent", message = "Parent category ID is not valid"))]
    pub parent: Option<String>,
}

/// Input for updating a food group.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFoodGroupInput {
    #[validate(length(
        min = 3,
        max = 100,
        message = "Category title must be between 3 and 100 characters"
    ))]
    pub title: Option<String>,

    #[validate(length(
        min = 3,
        max = 100,
        message = "Category English title must be between 3 and 100 characters"
    ))]
    pub english_title: Option<String>,

    #[validate(length(
        min = 3,
        max = 200,
        message = "Category description must be between 3 and 200 characters"
    ))]
    pub description: String,

    #[serde(rename = "type")]
    #[validate(custom(function = "validate_update_type", message = "Category type is not valid"))]
    pub kind: String,

    #[validate(custom(function = "validate_id", message = "Category ID is not valid"))]
    pub category: Option<String>,

    #[serde(default, alias = "foodParentId")]
    #[validate(custom(function = "validate_parent", message = "Parent category ID is not valid"))]
    pub parent: Option<String>,
}

fn validate_type_in(value: &str, allowed: &[FoodGroupType]) -> Result<(), ValidationError> {
    match FoodGroupType::parse(value) {
        Some(kind) if allowed.contains(&kind) => Ok(()),
        _ => Err(ValidationError::new("type")),
    }
}

fn validate_create_type(value: &str) -> Result<(), ValidationError> {
    validate_type_in(value, &CREATE_TYPES)
}

fn validate_update_type(value: &str) -> Result<(), ValidationError> {
    validate_type_in(value, &UPDATE_TYPES)
}

fn validate_id(value: &str) -> Result<(), ValidationError> {
    if is_valid_id(value) {
        Ok(())
    } else {
        Err(ValidationError::new("id"))
    }
}

fn validate_parent(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    validate_id(value)
}

fn parse_type(value: &str) -> AppResult<FoodGroupType> {
    FoodGroupType::parse(value)
        .ok_or_else(|| AppError::Validation("Category type is not valid".to_string()))
}

/// Empty parent strings clear the parent.
fn normalize_parent(parent: String) -> Option<String> {
    if parent.is_empty() { None } else { Some(parent) }
}

/// Service for the food group taxonomy.
#[derive(Clone)]
pub struct FoodGroupService {
    food_group_repo: FoodGroupRepository,
    id_gen: IdGenerator,
}

impl FoodGroupService {
    /// Create a new food group service.
    #[must_use]
    pub const fn new(food_group_repo: FoodGroupRepository) -> Self {
        Self {
            food_group_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List food groups, treating query parameters as equality filters.
    ///
    /// Unknown keys are ignored. A `type` value outside the known set
    /// matches nothing.
    pub async fn list(&self, params: &HashMap<String, String>) -> AppResult<Vec<food_group::Model>> {
        let mut filter = FoodGroupFilter::default();
        for (key, value) in params {
            match key.as_str() {
                "title" => filter.title = Some(value.clone()),
                "englishTitle" => filter.english_title = Some(value.clone()),
                "description" => filter.description = Some(value.clone()),
                "parent" => filter.parent_id = Some(value.clone()),
                "category" => filter.category_id = Some(value.clone()),
                "type" => match FoodGroupType::parse(value) {
                    Some(kind) => filter.kind = Some(kind),
                    None => return Ok(vec![]),
                },
                _ => {}
            }
        }

        self.food_group_repo
            .find_matching(filter)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to list food groups");
                AppError::ServiceUnavailable("Categories not found".to_string())
            })
    }

    /// Get a food group by ID.
    pub async fn get_by_id(&self, id: &str) -> AppResult<food_group::Model> {
        self.food_group_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::BadRequest(NOT_FOUND.to_string()))
    }

    /// Create a new food group.
    pub async fn create(&self, input: CreateFoodGroupInput) -> AppResult<food_group::Model> {
        input.validate()?;
        let kind = parse_type(&input.kind)?;

        if self
            .food_group_repo
            .find_by_english_title(&input.english_title)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "A category with this title already exists.".to_string(),
            ));
        }

        let model = food_group::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            english_title: Set(input.english_title),
            description: Set(input.description),
            kind: Set(kind),
            parent_id: Set(input.parent.and_then(normalize_parent)),
            category_id: Set(input.category),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        let created = self.food_group_repo.create(model).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to insert food group");
            AppError::Internal("Category was not added".to_string())
        })?;

        tracing::info!(id = %created.id, english_title = %created.english_title, "Food group created");
        Ok(created)
    }

    /// Update the supplied fields of a food group.
    pub async fn update(&self, id: &str, input: UpdateFoodGroupInput) -> AppResult<()> {
        self.get_by_id(id).await?;
        input.validate()?;
        let kind = parse_type(&input.kind)?;

        let mut changes = food_group::ActiveModel {
            description: Set(input.description),
            kind: Set(kind),
            updated_at: Set(Some(Utc::now().into())),
            ..Default::default()
        };
        if let Some(title) = input.title {
            changes.title = Set(title);
        }
        if let Some(english_title) = input.english_title {
            changes.english_title = Set(english_title);
        }
        if let Some(category) = input.category {
            changes.category_id = Set(category);
        }
        if let Some(parent) = input.parent {
            changes.parent_id = Set(normalize_parent(parent));
        }

        let updated = self.food_group_repo.update_fields(id, changes).await?;
        if updated == 0 {
            return Err(AppError::Internal("Update was not performed".to_string()));
        }

        Ok(())
    }

    /// Delete a food group and its direct children.
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        self.get_by_id(id).await?;

        let deleted = self.food_group_repo.delete_with_children(id).await?;
        if deleted == 0 {
            return Err(AppError::Internal(
                "Category deletion was not performed".to_string(),
            ));
        }

        tracing::info!(id = %id, deleted, "Food group deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    const CATEGORY_ID: &str = "01hv2k3m4n5p6q7r8s9t0vwxyz";
    const GROUP_ID: &str = "01hv2k3m4n5p6q7r8s9t0vwxy1";

    fn create_test_group(id: &str, english_title: &str) -> food_group::Model {
        food_group::Model {
            id: id.to_string(),
            title: "Vegetables".to_string(),
            english_title: english_title.to_string(),
            description: "Fresh vegetables".to_string(),
            kind: FoodGroupType::FoodGroup,
            parent_id: None,
            category_id: CATEGORY_ID.to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_input(english_title: &str) -> CreateFoodGroupInput {
        CreateFoodGroupInput {
            title: "Vegetables".to_string(),
            english_title: english_title.to_string(),
            description: "Fresh vegetables".to_string(),
            kind: "foodGroup".to_string(),
            category: CATEGORY_ID.to_string(),
            parent: Some(String::new()),
        }
    }

    fn update_input(kind: &str) -> UpdateFoodGroupInput {
        UpdateFoodGroupInput {
            title: Some("Greens".to_string()),
            english_title: None,
            description: "Leafy greens".to_string(),
            kind: kind.to_string(),
            category: None,
            parent: None,
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[test]
    fn test_create_and_update_type_sets_differ() {
        assert!(validate_create_type("foodGroup").is_ok());
        assert!(validate_create_type("product").is_err());
        assert!(validate_update_type("product").is_ok());
        assert!(validate_update_type("foodGroup").is_err());
        assert!(validate_update_type("recipe").is_err());
    }

    #[test]
    fn test_parent_accepts_empty_string_and_alias() {
        let input: CreateFoodGroupInput = serde_json::from_value(serde_json::json!({
            "title": "Roots",
            "englishTitle": "roots",
            "description": "Root vegetables",
            "type": "foodGroup",
            "category": CATEGORY_ID,
            "foodParentId": "",
        }))
        .unwrap();

        assert_eq!(input.parent.as_deref(), Some(""));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_validation_messages() {
        let mut input = create_input("vegetables");
        input.title = "ab".to_string();
        let err: AppError = input.validate().unwrap_err().into();
        assert_eq!(
            err.to_string(),
            "Category title must be between 3 and 100 characters"
        );

        let mut input = create_input("vegetables");
        input.category = "not-an-id".to_string();
        assert!(input.validate().is_err());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_english_title() {
        let existing = create_test_group(GROUP_ID, "vegetables");
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = FoodGroupService::new(FoodGroupRepository::new(db.clone()));
        let result = service.create(create_input("vegetables")).await;

        match result {
            Err(AppError::BadRequest(msg)) => {
                assert_eq!(msg, "A category with this title already exists.");
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }

        drop(service);
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        assert_eq!(log.len(), 1, "no insert may follow the duplicate check");
    }

    #[tokio::test]
    async fn test_create_inserts_new_group() {
        let created = create_test_group(GROUP_ID, "vegetables");
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<food_group::Model>::new()])
                .append_query_results([[created]])
                .into_connection(),
        );

        let service = FoodGroupService::new(FoodGroupRepository::new(db));
        let result = service.create(create_input("vegetables")).await.unwrap();
        assert_eq!(result.english_title, "vegetables");
        assert_eq!(result.parent_id, None);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_bad_request() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<food_group::Model>::new()])
                .into_connection(),
        );

        let service = FoodGroupService::new(FoodGroupRepository::new(db));
        let result = service.update(GROUP_ID, update_input("post")).await;
        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == NOT_FOUND));
    }

    #[tokio::test]
    async fn test_update_zero_rows_is_internal_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_group(GROUP_ID, "vegetables")]])
                .append_exec_results([exec(0)])
                .into_connection(),
        );

        let service = FoodGroupService::new(FoodGroupRepository::new(db));
        let result = service.update(GROUP_ID, update_input("post")).await;
        assert!(matches!(result, Err(AppError::Internal(msg)) if msg == "Update was not performed"));
    }

    #[tokio::test]
    async fn test_update_rejects_create_only_type() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_group(GROUP_ID, "vegetables")]])
                .into_connection(),
        );

        let service = FoodGroupService::new(FoodGroupRepository::new(db));
        let result = service.update(GROUP_ID, update_input("foodGroup")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_children() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_group(GROUP_ID, "vegetables")]])
                .append_exec_results([exec(2)])
                .into_connection(),
        );

        let service = FoodGroupService::new(FoodGroupRepository::new(db));
        assert_eq!(service.delete(GROUP_ID).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_zero_rows_is_internal_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_group(GROUP_ID, "vegetables")]])
                .append_exec_results([exec(0)])
                .into_connection(),
        );

        let service = FoodGroupService::new(FoodGroupRepository::new(db));
        let result = service.delete(GROUP_ID).await;
        assert!(matches!(
            result,
            Err(AppError::Internal(msg)) if msg == "Category deletion was not performed"
        ));
    }

    #[tokio::test]
    async fn test_list_store_failure_is_service_unavailable() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([sea_orm::DbErr::Custom("connection lost".to_string())])
                .into_connection(),
        );

        let service = FoodGroupService::new(FoodGroupRepository::new(db));
        let result = service.list(&HashMap::new()).await;
        assert!(
            matches!(result, Err(AppError::ServiceUnavailable(msg)) if msg == "Categories not found")
        );
    }

    #[tokio::test]
    async fn test_list_empty_result_is_ok() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<food_group::Model>::new()])
                .into_connection(),
        );

        let service = FoodGroupService::new(FoodGroupRepository::new(db));
        let mut params = HashMap::new();
        params.insert("englishTitle".to_string(), "vegetables".to_string());
        params.insert("page".to_string(), "2".to_string());
        assert!(service.list(&params).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_unknown_type_matches_nothing() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = FoodGroupService::new(FoodGroupRepository::new(db));
        let mut params = HashMap::new();
        params.insert("type".to_string(), "recipe".to_string());
        assert!(service.list(&params).await.unwrap().is_empty());
    }
}
