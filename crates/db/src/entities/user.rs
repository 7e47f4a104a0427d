//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "employee")]
    Employee,
    #[sea_orm(string_value = "client")]
    Client,
}

impl UserRole {
    /// Whether this role must belong to a department.
    #[must_use]
    pub const fn requires_department(self) -> bool {
        matches!(self, Self::Manager | Self::Employee)
    }

    /// Whether a user with this role may be assigned complaints.
    #[must_use]
    pub const fn is_assignable(self) -> bool {
        matches!(self, Self::Manager | Self::Employee)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub username: String,

    pub username_lower: String,

    /// Display name
    #[sea_orm(nullable)]
    pub name: Option<String>,

    /// Contact address for notification mail
    #[sea_orm(nullable)]
    pub email: Option<String>,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Access token
    #[sea_orm(unique, nullable)]
    #[serde(skip_serializing)]
    pub token: Option<String>,

    pub role: UserRole,

    /// Department membership (required for manager/employee)
    #[sea_orm(nullable)]
    pub department_id: Option<String>,

    /// Gates login and assignment eligibility
    #[sea_orm(default_value = true)]
    pub is_active: bool,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::complaint::Entity")]
    Complaints,

    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::complaint::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Complaints.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_requirement_per_role() {
        assert!(UserRole::Manager.requires_department());
        assert!(UserRole::Employee.requires_department());
        assert!(!UserRole::Admin.requires_department());
        assert!(!UserRole::Client.requires_department());
    }

    #[test]
    fn test_assignability_per_role() {
        assert!(UserRole::Manager.is_assignable());
        assert!(UserRole::Employee.is_assignable());
        assert!(!UserRole::Admin.is_assignable());
        assert!(!UserRole::Client.is_assignable());
    }
}
