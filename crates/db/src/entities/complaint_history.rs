//! Complaint history entity.
//!
//! An append-only audit record: one row per status change or reassignment.
//! Rows are never updated or deleted through normal workflow.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::complaint::ComplaintStatus;

/// Complaint history model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "complaint_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub complaint_id: String,

    /// Status at/after this event.
    pub status: ComplaintStatus,

    /// Previous assignee; populated only for reassignment events.
    #[sea_orm(nullable)]
    pub assigned_from: Option<String>,

    /// New assignee; populated only for reassignment events.
    #[sea_orm(nullable)]
    pub assigned_to: Option<String>,

    /// Free-text note supplied with the event.
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::complaint::Entity",
        from = "Column::ComplaintId",
        to = "super::complaint::Column::Id",
        on_delete = "Cascade"
    )]
    Complaint,
}

impl Related<super::complaint::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Complaint.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
