//! Nature type service.

use desk_common::{AppError, AppResult, IdGenerator};
use desk_db::{
    entities::nature_type,
    repositories::{DepartmentRepository, NatureTypeRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::actor::ActorContext;

/// Input for creating a nature type.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateNatureTypeInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    pub department_id: String,
}

/// Input for updating a nature type.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNatureTypeInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    pub department_id: Option<String>,

    pub is_active: Option<bool>,
}

/// Nature type service for business logic.
#[derive(Clone)]
pub struct NatureTypeService {
    nature_type_repo: NatureTypeRepository,
    department_repo: DepartmentRepository,
    id_gen: IdGenerator,
}

impl NatureTypeService {
    /// Create a new nature type service.
    #[must_use]
    pub const fn new(
        nature_type_repo: NatureTypeRepository,
        department_repo: DepartmentRepository,
    ) -> Self {
        Self {
            nature_type_repo,
            department_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a nature type routed to an active department.
    pub async fn create(
        &self,
        actor: &ActorContext,
        input: CreateNatureTypeInput,
    ) -> AppResult<nature_type::Model> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can create nature types".to_string(),
            ));
        }

        input.validate()?;

        if self
            .nature_type_repo
            .find_by_name(&input.name)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "Nature type name already taken".to_string(),
            ));
        }

        let department = self.department_repo.get_by_id(&input.department_id).await?;
        if !department.is_active {
            return Err(AppError::BadRequest(format!(
                "Department {} is inactive",
                department.name
            )));
        }

        let model = nature_type::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            department_id: Set(input.department_id),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.nature_type_repo.create(model).await
    }

    /// Get a nature type by ID.
    pub async fn get(&self, id: &str) -> AppResult<nature_type::Model> {
        self.nature_type_repo.get_by_id(id).await
    }

    /// List nature types.
    pub async fn list(&self, active_only: bool) -> AppResult<Vec<nature_type::Model>> {
        self.nature_type_repo.list(active_only).await
    }

    /// Update a nature type.
    pub async fn update(
        &self,
        actor: &ActorContext,
        id: &str,
        input: UpdateNatureTypeInput,
    ) -> AppResult<nature_type::Model> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can update nature types".to_string(),
            ));
        }

        input.validate()?;

        let nature = self.nature_type_repo.get_by_id(id).await?;

        if let Some(ref department_id) = input.department_id {
            let department = self.department_repo.get_by_id(department_id).await?;
            if !department.is_active {
                return Err(AppError::BadRequest(format!(
                    "Department {} is inactive",
                    department.name
                )));
            }
        }

        let mut active: nature_type::ActiveModel = nature.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(department_id) = input.department_id {
            active.department_id = Set(department_id);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }

        self.nature_type_repo.update(active).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use desk_db::entities::user::UserRole;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_requires_admin() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = NatureTypeService::new(
            NatureTypeRepository::new(db.clone()),
            DepartmentRepository::new(db),
        );

        let actor = ActorContext::new("client1".to_string(), UserRole::Client, None);
        let result = svc
            .create(
                &actor,
                CreateNatureTypeInput {
                    name: "Billing Error".to_string(),
                    department_id: "dept1".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
