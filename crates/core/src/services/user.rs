//! User service.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use desk_common::{AppError, AppResult, IdGenerator};
use desk_db::{
    entities::user::{self, UserRole},
    repositories::UserRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::actor::ActorContext;

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for client self-registration.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupInput {
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(max = 256))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,
}

/// Input for admin-side user creation.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(max = 256))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub role: UserRole,

    pub department_id: Option<String>,
}

/// Input for updating a user.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserInput {
    #[validate(length(max = 256))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub role: Option<UserRole>,

    pub department_id: Option<String>,

    pub is_active: Option<bool>,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Self-registration; always creates a client account.
    pub async fn signup(&self, input: SignupInput) -> AppResult<user::Model> {
        input.validate()?;

        self.ensure_username_free(&input.username).await?;

        let password_hash = hash_password(&input.password)?;
        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(input.username.clone()),
            username_lower: Set(input.username.to_lowercase()),
            name: Set(input.name),
            email: Set(input.email),
            password_hash: Set(password_hash),
            token: Set(Some(self.id_gen.generate_token())),
            role: Set(UserRole::Client),
            department_id: Set(None),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.user_repo.create(model).await
    }

    /// Admin-side user creation with an explicit role.
    ///
    /// Managers and employees must carry a department.
    pub async fn create(
        &self,
        actor: &ActorContext,
        input: CreateUserInput,
    ) -> AppResult<user::Model> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can create users".to_string(),
            ));
        }

        input.validate()?;

        if input.role.requires_department() && input.department_id.is_none() {
            return Err(AppError::BadRequest(format!(
                "A department is required for the {:?} role",
                input.role
            )));
        }

        self.ensure_username_free(&input.username).await?;

        let password_hash = hash_password(&input.password)?;
        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(input.username.clone()),
            username_lower: Set(input.username.to_lowercase()),
            name: Set(input.name),
            email: Set(input.email),
            password_hash: Set(password_hash),
            token: Set(Some(self.id_gen.generate_token())),
            role: Set(input.role),
            department_id: Set(input.department_id),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.user_repo.create(model).await
    }

    /// Authenticate with username and password.
    ///
    /// Inactive accounts cannot sign in.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !user.is_active {
            return Err(AppError::Forbidden("Account is deactivated".to_string()));
        }

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }

    /// Authenticate with a bearer token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !user.is_active {
            return Err(AppError::Forbidden("Account is deactivated".to_string()));
        }

        Ok(user)
    }

    /// Invalidate the current token by regenerating it.
    pub async fn regenerate_token(&self, user_id: &str) -> AppResult<String> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let new_token = self.id_gen.generate_token();

        let mut active: user::ActiveModel = user.into();
        active.token = Set(Some(new_token.clone()));
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.user_repo.update(active).await?;

        Ok(new_token)
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// List users, optionally filtered by role and department.
    pub async fn list(
        &self,
        actor: &ActorContext,
        role: Option<UserRole>,
        department_id: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<user::Model>> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden("Only admins can list users".to_string()));
        }

        self.user_repo
            .list(role, department_id, limit.min(100), offset)
            .await
    }

    /// Update a user's profile, role, department, or active flag.
    pub async fn update(
        &self,
        actor: &ActorContext,
        id: &str,
        input: UpdateUserInput,
    ) -> AppResult<user::Model> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can update users".to_string(),
            ));
        }

        input.validate()?;

        let user = self.user_repo.get_by_id(id).await?;

        let new_role = input.role.unwrap_or(user.role);
        let new_department = input
            .department_id
            .clone()
            .or_else(|| user.department_id.clone());
        if new_role.requires_department() && new_department.is_none() {
            return Err(AppError::BadRequest(format!(
                "A department is required for the {new_role:?} role"
            )));
        }

        let mut active: user::ActiveModel = user.into();
        if input.name.is_some() {
            active.name = Set(input.name);
        }
        if input.email.is_some() {
            active.email = Set(input.email);
        }
        if let Some(role) = input.role {
            active.role = Set(role);
        }
        if input.department_id.is_some() {
            active.department_id = Set(input.department_id);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await
    }

    /// Eligible reassignment targets for a department: its own active
    /// employees plus active managers of other departments.
    pub async fn eligible_assignees(&self, department_id: &str) -> AppResult<Vec<user::Model>> {
        let mut assignees = self.user_repo.find_active_employees(department_id).await?;
        let managers = self
            .user_repo
            .find_active_managers_excluding(department_id)
            .await?;
        assignees.extend(managers);
        Ok(assignees)
    }

    async fn ensure_username_free(&self, username: &str) -> AppResult<()> {
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(AppError::BadRequest("Username already taken".to_string()));
        }
        Ok(())
    }
}

/// Hash a password with Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against its hash.
fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn admin() -> ActorContext {
        ActorContext::new("admin1".to_string(), UserRole::Admin, None)
    }

    fn test_user(id: &str, role: UserRole, active: bool) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: id.to_string(),
            username_lower: id.to_string(),
            name: None,
            email: None,
            password_hash: hash_password("correct horse battery").unwrap(),
            token: Some("token1".to_string()),
            role,
            department_id: None,
            is_active: active,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(verify_password("hunter2hunter2", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_inactive_account() {
        let user = test_user("client1", UserRole::Client, false);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );

        let svc = UserService::new(UserRepository::new(db));
        let result = svc.authenticate("client1", "correct horse battery").await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_wrong_password() {
        let user = test_user("client1", UserRole::Client, true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );

        let svc = UserService::new(UserRepository::new(db));
        let result = svc.authenticate("client1", "not the password").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = UserService::new(UserRepository::new(db));

        let actor = ActorContext::new("mgr1".to_string(), UserRole::Manager, Some("d1".to_string()));
        let result = svc
            .create(
                &actor,
                CreateUserInput {
                    username: "newbie".to_string(),
                    password: "longenoughpw".to_string(),
                    name: None,
                    email: None,
                    role: UserRole::Employee,
                    department_id: Some("d1".to_string()),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_manager_without_department_rejected() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = UserService::new(UserRepository::new(db));

        let result = svc
            .create(
                &admin(),
                CreateUserInput {
                    username: "newmgr".to_string(),
                    password: "longenoughpw".to_string(),
                    name: None,
                    email: None,
                    role: UserRole::Manager,
                    department_id: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
