//! Department entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Department model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "department")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub name: String,

    /// The user managing this department.
    #[sea_orm(nullable)]
    pub manager_id: Option<String>,

    /// Receives complaints routed here while unassigned.
    #[sea_orm(nullable)]
    pub default_assignee_id: Option<String>,

    /// Deactivation hides the department from routing but must not affect
    /// already-assigned complaints.
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
}

impl Related<super::complaint::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Complaints.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
