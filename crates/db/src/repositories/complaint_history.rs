//! Complaint history repository.
//!
//! History entries are append-only; the only insert path is the complaint
//! repository's transactional lifecycle write. This repository is read-only.

use std::sync::Arc;

use crate::entities::{complaint_history, ComplaintHistory};
use desk_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

/// Complaint history repository for database operations.
#[derive(Clone)]
pub struct ComplaintHistoryRepository {
    db: Arc<DatabaseConnection>,
}

impl ComplaintHistoryRepository {
    /// Create a new complaint history repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Get all history entries for a complaint, oldest first.
    ///
    /// Ties on `created_at` are broken by `id`; IDs are ULIDs, so this is
    /// insertion order.
    pub async fn find_by_complaint(
        &self,
        complaint_id: &str,
    ) -> AppResult<Vec<complaint_history::Model>> {
        ComplaintHistory::find()
            .filter(complaint_history::Column::ComplaintId.eq(complaint_id))
            .order_by_asc(complaint_history::Column::CreatedAt)
            .order_by_asc(complaint_history::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count history entries for a complaint.
    pub async fn count_by_complaint(&self, complaint_id: &str) -> AppResult<u64> {
        ComplaintHistory::find()
            .filter(complaint_history::Column::ComplaintId.eq(complaint_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
