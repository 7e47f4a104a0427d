//! Complaint repository.

use std::sync::Arc;

use crate::entities::{
    complaint::{self, ComplaintStatus},
    complaint_history, Complaint,
};
use desk_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};

/// Filters for complaint listings.
///
/// The service layer chooses the filter set matching the caller's role;
/// the repository applies whatever is present.
#[derive(Debug, Clone, Default)]
pub struct ComplaintFilter {
    /// Restrict to this status.
    pub status: Option<ComplaintStatus>,
    /// Restrict to this department.
    pub department_id: Option<String>,
    /// Restrict to complaints owned by this client.
    pub client_id: Option<String>,
    /// Restrict to complaints currently assigned to this user.
    pub assignee_id: Option<String>,
}

/// Complaint repository for database operations.
#[derive(Clone)]
pub struct ComplaintRepository {
    db: Arc<DatabaseConnection>,
}

impl ComplaintRepository {
    /// Create a new complaint repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a complaint by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<complaint::Model>> {
        Complaint::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a complaint by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<complaint::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ComplaintNotFound(id.to_string()))
    }

    /// Create a new complaint.
    pub async fn create(&self, model: complaint::ActiveModel) -> AppResult<complaint::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List complaints matching a filter (paginated, newest first).
    pub async fn list(
        &self,
        filter: &ComplaintFilter,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<complaint::Model>> {
        let mut query = Complaint::find().order_by_desc(complaint::Column::Id);

        if let Some(status) = filter.status {
            query = query.filter(complaint::Column::Status.eq(status));
        }
        if let Some(ref department_id) = filter.department_id {
            query = query.filter(complaint::Column::DepartmentId.eq(department_id.clone()));
        }
        if let Some(ref client_id) = filter.client_id {
            query = query.filter(complaint::Column::ClientId.eq(client_id.clone()));
        }
        if let Some(ref assignee_id) = filter.assignee_id {
            query = query.filter(complaint::Column::CurrentAssigneeId.eq(assignee_id.clone()));
        }

        query
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Apply a lifecycle mutation and append its history entry in a single
    /// transaction.
    ///
    /// Either both writes land or neither does; a storage failure leaves no
    /// dangling history entry behind.
    pub async fn update_with_history(
        &self,
        complaint: complaint::ActiveModel,
        entry: complaint_history::ActiveModel,
    ) -> AppResult<(complaint::Model, complaint_history::Model)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let updated = complaint
            .update(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let entry = entry
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok((updated, entry))
    }

    /// Hard-delete a complaint. History and notifications cascade.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Complaint::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
