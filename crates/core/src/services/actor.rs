//! Acting-user context.
//!
//! Every lifecycle call receives the actor explicitly; nothing reads
//! role or department from ambient state.

use desk_db::entities::user::{self, UserRole};

/// The authenticated user performing an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    /// The acting user's ID.
    pub user_id: String,
    /// The acting user's role.
    pub role: UserRole,
    /// The acting user's department, if any.
    pub department_id: Option<String>,
}

impl ActorContext {
    /// Create an actor context.
    #[must_use]
    pub const fn new(user_id: String, role: UserRole, department_id: Option<String>) -> Self {
        Self {
            user_id,
            role,
            department_id,
        }
    }

    /// Build the context from an authenticated user row.
    #[must_use]
    pub fn from_user(user: &user::Model) -> Self {
        Self {
            user_id: user.id.clone(),
            role: user.role,
            department_id: user.department_id.clone(),
        }
    }

    /// Whether the actor is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Whether the actor manages the given department.
    #[must_use]
    pub fn manages_department(&self, department_id: &str) -> bool {
        matches!(self.role, UserRole::Manager)
            && self.department_id.as_deref() == Some(department_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_from_user_carries_role_and_department() {
        let user = user::Model {
            id: "mgr1".to_string(),
            username: "manager".to_string(),
            username_lower: "manager".to_string(),
            name: None,
            email: None,
            password_hash: "hash".to_string(),
            token: None,
            role: UserRole::Manager,
            department_id: Some("dept1".to_string()),
            is_active: true,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let actor = ActorContext::from_user(&user);
        assert_eq!(actor.user_id, "mgr1");
        assert!(actor.manages_department("dept1"));
        assert!(!actor.manages_department("dept2"));
        assert!(!actor.is_admin());
    }
}
