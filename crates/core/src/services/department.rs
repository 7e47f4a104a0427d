//! Department service.

use desk_common::{AppError, AppResult, IdGenerator};
use desk_db::{
    entities::department,
    repositories::{DepartmentRepository, UserRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::actor::ActorContext;

/// Input for creating a department.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDepartmentInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    pub manager_id: Option<String>,

    pub default_assignee_id: Option<String>,
}

/// Input for updating a department.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDepartmentInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    pub manager_id: Option<String>,

    pub default_assignee_id: Option<String>,

    pub is_active: Option<bool>,
}

/// Department service for business logic.
#[derive(Clone)]
pub struct DepartmentService {
    department_repo: DepartmentRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl DepartmentService {
    /// Create a new department service.
    #[must_use]
    pub const fn new(department_repo: DepartmentRepository, user_repo: UserRepository) -> Self {
        Self {
            department_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a department.
    pub async fn create(
        &self,
        actor: &ActorContext,
        input: CreateDepartmentInput,
    ) -> AppResult<department::Model> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can create departments".to_string(),
            ));
        }

        input.validate()?;

        if self
            .department_repo
            .find_by_name(&input.name)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "Department name already taken".to_string(),
            ));
        }

        if let Some(ref manager_id) = input.manager_id {
            self.ensure_active_user(manager_id).await?;
        }
        if let Some(ref assignee_id) = input.default_assignee_id {
            self.ensure_active_user(assignee_id).await?;
        }

        let model = department::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            manager_id: Set(input.manager_id),
            default_assignee_id: Set(input.default_assignee_id),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.department_repo.create(model).await
    }

    /// Get a department by ID.
    pub async fn get(&self, id: &str) -> AppResult<department::Model> {
        self.department_repo.get_by_id(id).await
    }

    /// List departments. `active_only` hides deactivated departments from
    /// routing UIs; already-assigned complaints are unaffected either way.
    pub async fn list(&self, active_only: bool) -> AppResult<Vec<department::Model>> {
        self.department_repo.list(active_only).await
    }

    /// Update a department.
    pub async fn update(
        &self,
        actor: &ActorContext,
        id: &str,
        input: UpdateDepartmentInput,
    ) -> AppResult<department::Model> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can update departments".to_string(),
            ));
        }

        input.validate()?;

        let department = self.department_repo.get_by_id(id).await?;

        if let Some(ref manager_id) = input.manager_id {
            self.ensure_active_user(manager_id).await?;
        }
        if let Some(ref assignee_id) = input.default_assignee_id {
            self.ensure_active_user(assignee_id).await?;
        }

        let mut active: department::ActiveModel = department.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if input.manager_id.is_some() {
            active.manager_id = Set(input.manager_id);
        }
        if input.default_assignee_id.is_some() {
            active.default_assignee_id = Set(input.default_assignee_id);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.department_repo.update(active).await
    }

    async fn ensure_active_user(&self, user_id: &str) -> AppResult<()> {
        let user = self.user_repo.get_by_id(user_id).await?;
        if !user.is_active {
            return Err(AppError::BadRequest(format!(
                "User {} is inactive",
                user.username
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use desk_db::entities::user::{self, UserRole};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn admin() -> ActorContext {
        ActorContext::new("admin1".to_string(), UserRole::Admin, None)
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = DepartmentService::new(
            DepartmentRepository::new(db.clone()),
            UserRepository::new(db),
        );

        let actor = ActorContext::new("emp1".to_string(), UserRole::Employee, Some("d1".to_string()));
        let result = svc
            .create(
                &actor,
                CreateDepartmentInput {
                    name: "Billing".to_string(),
                    manager_id: None,
                    default_assignee_id: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_inactive_default_assignee() {
        let inactive = user::Model {
            id: "emp1".to_string(),
            username: "emp1".to_string(),
            username_lower: "emp1".to_string(),
            name: None,
            email: None,
            password_hash: "hash".to_string(),
            token: None,
            role: UserRole::Employee,
            department_id: Some("d1".to_string()),
            is_active: false,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // Name-uniqueness probe returns nothing, then the assignee
                // lookup returns the inactive user
                .append_query_results([Vec::<department::Model>::new()])
                .append_query_results([[inactive]])
                .into_connection(),
        );

        let svc = DepartmentService::new(
            DepartmentRepository::new(db.clone()),
            UserRepository::new(db),
        );

        let result = svc
            .create(
                &admin(),
                CreateDepartmentInput {
                    name: "Billing".to_string(),
                    manager_id: None,
                    default_assignee_id: Some("emp1".to_string()),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
