//! Department repository.

use std::sync::Arc;

use crate::entities::{department, Department};
use desk_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Department repository for database operations.
#[derive(Clone)]
pub struct DepartmentRepository {
    db: Arc<DatabaseConnection>,
}

impl DepartmentRepository {
    /// Create a new department repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a department by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<department::Model>> {
        Department::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a department by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<department::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::DepartmentNotFound(id.to_string()))
    }

    /// Find a department by name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<department::Model>> {
        Department::find()
            .filter(department::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new department.
    pub async fn create(&self, model: department::ActiveModel) -> AppResult<department::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a department.
    pub async fn update(&self, model: department::ActiveModel) -> AppResult<department::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List departments, optionally restricted to active ones.
    pub async fn list(&self, active_only: bool) -> AppResult<Vec<department::Model>> {
        let mut query = Department::find().order_by_asc(department::Column::Name);

        if active_only {
            query = query.filter(department::Column::IsActive.eq(true));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_department(id: &str, name: &str) -> department::Model {
        department::Model {
            id: id.to_string(),
            name: name.to_string(),
            manager_id: Some("mgr1".to_string()),
            default_assignee_id: Some("emp1".to_string()),
            is_active: true,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let dept = create_test_department("dept1", "Billing");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[dept.clone()]])
                .into_connection(),
        );

        let repo = DepartmentRepository::new(db);
        let result = repo.get_by_id("dept1").await.unwrap();

        assert_eq!(result.name, "Billing");
        assert_eq!(result.default_assignee_id.as_deref(), Some("emp1"));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<department::Model>::new()])
                .into_connection(),
        );

        let repo = DepartmentRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::DepartmentNotFound(_))));
    }
}
