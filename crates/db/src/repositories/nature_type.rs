//! Nature type repository.

use std::sync::Arc;

use crate::entities::{nature_type, NatureType};
use desk_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Nature type repository for database operations.
#[derive(Clone)]
pub struct NatureTypeRepository {
    db: Arc<DatabaseConnection>,
}

impl NatureTypeRepository {
    /// Create a new nature type repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a nature type by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<nature_type::Model>> {
        NatureType::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a nature type by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<nature_type::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("nature type {id}")))
    }

    /// Find a nature type by name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<nature_type::Model>> {
        NatureType::find()
            .filter(nature_type::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new nature type.
    pub async fn create(&self, model: nature_type::ActiveModel) -> AppResult<nature_type::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a nature type.
    pub async fn update(&self, model: nature_type::ActiveModel) -> AppResult<nature_type::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List nature types, optionally restricted to active ones.
    pub async fn list(&self, active_only: bool) -> AppResult<Vec<nature_type::Model>> {
        let mut query = NatureType::find().order_by_asc(nature_type::Column::Name);

        if active_only {
            query = query.filter(nature_type::Column::IsActive.eq(true));
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

    #[tokio::test]
    async fn test_get_by_id_found() {
        let nature = nature_type::Model {
            id: "nt1".to_string(),
            name: "Billing Error".to_string(),
            department_id: "dept1".to_string(),
            is_active: true,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[nature.clone()]])
                .into_connection(),
        );

        let repo = NatureTypeRepository::new(db);
        let result = repo.get_by_id("nt1").await.unwrap();

        assert_eq!(result.department_id, "dept1");
    }
}
