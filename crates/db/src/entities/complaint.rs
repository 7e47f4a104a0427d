//! Complaint entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Complaint lifecycle status.
///
/// Canonical forward order:
/// `New → Assigned → InProgress → Completed → Done → Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum ComplaintStatus {
    #[sea_orm(string_value = "new")]
    #[default]
    New,
    #[sea_orm(string_value = "assigned")]
    Assigned,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "done")]
    Done,
    #[sea_orm(string_value = "closed")]
    Closed,
}

impl ComplaintStatus {
    /// All statuses in canonical forward order.
    pub const ORDERED: [Self; 6] = [
        Self::New,
        Self::Assigned,
        Self::InProgress,
        Self::Completed,
        Self::Done,
        Self::Closed,
    ];

    /// Position of this status in the canonical order.
    #[must_use]
    pub fn rank(self) -> usize {
        // ORDERED covers every variant, so the lookup always succeeds
        Self::ORDERED.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Whether this is the terminal status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::New => "New",
            Self::Assigned => "Assigned",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Done => "Done",
            Self::Closed => "Closed",
        };
        write!(f, "{s}")
    }
}

/// Complaint model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "complaint")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Short summary, set at creation.
    pub title: String,

    /// Full description, set at creation.
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Kind of error being reported, set at creation.
    #[sea_orm(nullable)]
    pub error_type: Option<String>,

    /// Screen/page where the error was observed, set at creation.
    #[sea_orm(nullable)]
    pub error_screen: Option<String>,

    /// The client who owns this complaint.
    pub client_id: String,

    /// Categorical tag used for routing, set at creation.
    #[sea_orm(nullable)]
    pub nature_type_id: Option<String>,

    /// Attachment file references.
    #[sea_orm(column_type = "JsonBinary")]
    pub attachments: Json,

    /// Current lifecycle status.
    pub status: ComplaintStatus,

    /// Department currently owning this complaint.
    pub department_id: String,

    /// User currently responsible for this complaint.
    #[sea_orm(nullable)]
    pub current_assignee_id: Option<String>,

    /// First user ever assigned; set once and never changed after.
    #[sea_orm(nullable)]
    pub first_assignee_id: Option<String>,

    /// Free-text operator note.
    #[sea_orm(column_type = "Text", nullable)]
    pub remark: Option<String>,

    /// Optimistic-concurrency counter, bumped on every mutation.
    pub version: i32,

    pub created_at: DateTimeWithTimeZone,

    /// Bumped on every mutation.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ClientId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Client,

    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id"
    )]
    Department,

    #[sea_orm(has_many = "super::complaint_history::Entity")]
    History,
}

impl Related<super::complaint_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
