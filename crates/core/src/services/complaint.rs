//! Complaint lifecycle service.
//!
//! Owns the status state machine, assignment transfer, and history-entry
//! emission. Every role-specific caller goes through this one contract.

use desk_common::{AppError, AppResult, IdGenerator};
use desk_db::{
    entities::{
        complaint::{self, ComplaintStatus},
        complaint_history,
        user::UserRole,
    },
    repositories::{
        ComplaintFilter, ComplaintHistoryRepository, ComplaintRepository, DepartmentRepository,
        NatureTypeRepository, UserRepository,
    },
};
use sea_orm::{ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::{
    actor::ActorContext,
    notification::NotificationService,
    workflow,
};

/// Input for creating a complaint.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateComplaintInput {
    #[validate(length(min = 1, max = 512))]
    pub title: String,

    #[validate(length(min = 1, max = 8192))]
    pub description: String,

    #[validate(length(max = 256))]
    pub error_type: Option<String>,

    #[validate(length(max = 256))]
    pub error_screen: Option<String>,

    /// Client the complaint belongs to; required when a manager or admin
    /// files on a client's behalf, ignored for client callers.
    pub client_id: Option<String>,

    /// Explicit routing target; wins over the nature type's department.
    pub department_id: Option<String>,

    /// Categorical tag; routes to the nature type's department when no
    /// explicit department is given.
    pub nature_type_id: Option<String>,

    /// Attachment file references.
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// Input for a status transition.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusInput {
    pub status: ComplaintStatus,

    #[validate(length(max = 2048))]
    pub notes: Option<String>,

    /// Operator note persisted on the complaint itself.
    #[validate(length(max = 2048))]
    pub remark: Option<String>,

    /// When supplied, the mutation is rejected with a conflict if the
    /// stored version has advanced since the caller last read.
    pub expected_version: Option<i32>,
}

/// Input for a reassignment.
#[derive(Debug, Deserialize, Validate)]
pub struct ReassignInput {
    #[validate(length(min = 1))]
    pub user_id: String,

    #[validate(length(max = 2048))]
    pub notes: Option<String>,

    pub expected_version: Option<i32>,
}

/// Listing query; the service narrows it to what the caller may see.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListComplaintsQuery {
    pub status: Option<ComplaintStatus>,
    pub department_id: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// A complaint together with its ordered history.
#[derive(Debug, Clone, Serialize)]
pub struct ComplaintWithHistory {
    pub complaint: complaint::Model,
    pub history: Vec<complaint_history::Model>,
}

/// Complaint lifecycle service.
#[derive(Clone)]
pub struct ComplaintService {
    complaint_repo: ComplaintRepository,
    history_repo: ComplaintHistoryRepository,
    user_repo: UserRepository,
    department_repo: DepartmentRepository,
    nature_type_repo: NatureTypeRepository,
    notifier: Option<NotificationService>,
    id_gen: IdGenerator,
    strict_order: bool,
}

impl ComplaintService {
    /// Create a new complaint service.
    #[must_use]
    pub const fn new(
        complaint_repo: ComplaintRepository,
        history_repo: ComplaintHistoryRepository,
        user_repo: UserRepository,
        department_repo: DepartmentRepository,
        nature_type_repo: NatureTypeRepository,
        strict_order: bool,
    ) -> Self {
        Self {
            complaint_repo,
            history_repo,
            user_repo,
            department_repo,
            nature_type_repo,
            notifier: None,
            id_gen: IdGenerator::new(),
            strict_order,
        }
    }

    /// Attach the notification dispatcher.
    pub fn set_notifier(&mut self, notifier: NotificationService) {
        self.notifier = Some(notifier);
    }

    /// Create a complaint in status `New`, routed to a department and
    /// seeded with its default assignee.
    ///
    /// Creation appends no history entry; a fresh complaint has an empty
    /// timeline.
    pub async fn create(
        &self,
        actor: &ActorContext,
        input: CreateComplaintInput,
    ) -> AppResult<complaint::Model> {
        input.validate()?;

        let client_id = match actor.role {
            UserRole::Client => actor.user_id.clone(),
            UserRole::Manager | UserRole::Admin => {
                let client_id = input.client_id.clone().ok_or_else(|| {
                    AppError::BadRequest("clientId is required when filing on behalf".to_string())
                })?;
                let client = self.user_repo.get_by_id(&client_id).await?;
                if client.role != UserRole::Client {
                    return Err(AppError::BadRequest(format!(
                        "User {} is not a client",
                        client.username
                    )));
                }
                client_id
            }
            UserRole::Employee => {
                return Err(AppError::Forbidden(
                    "Employees cannot file complaints".to_string(),
                ));
            }
        };

        let department = self.resolve_department(&input).await?;
        let default_assignee = department.default_assignee_id.clone();

        let now = chrono::Utc::now();
        let model = complaint::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            description: Set(input.description),
            error_type: Set(input.error_type),
            error_screen: Set(input.error_screen),
            client_id: Set(client_id),
            nature_type_id: Set(input.nature_type_id),
            attachments: Set(serde_json::json!(input.attachments)),
            status: Set(ComplaintStatus::New),
            department_id: Set(department.id),
            current_assignee_id: Set(default_assignee.clone()),
            first_assignee_id: Set(default_assignee),
            remark: Set(None),
            version: Set(1),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        self.complaint_repo.create(model).await
    }

    /// Get a complaint with its ordered history.
    pub async fn get(&self, actor: &ActorContext, id: &str) -> AppResult<ComplaintWithHistory> {
        let complaint = self.complaint_repo.get_by_id(id).await?;
        self.authorize_view(actor, &complaint).await?;

        let history = self.history_repo.find_by_complaint(id).await?;
        Ok(ComplaintWithHistory { complaint, history })
    }

    /// Get only the ordered history of a complaint.
    pub async fn get_history(
        &self,
        actor: &ActorContext,
        id: &str,
    ) -> AppResult<Vec<complaint_history::Model>> {
        let complaint = self.complaint_repo.get_by_id(id).await?;
        self.authorize_view(actor, &complaint).await?;

        self.history_repo.find_by_complaint(id).await
    }

    /// List complaints visible to the actor.
    pub async fn list(
        &self,
        actor: &ActorContext,
        query: ListComplaintsQuery,
    ) -> AppResult<Vec<complaint::Model>> {
        let limit = query.limit.unwrap_or(50).min(100);
        let offset = query.offset.unwrap_or(0);

        let filter = match actor.role {
            UserRole::Admin => ComplaintFilter {
                status: query.status,
                department_id: query.department_id,
                ..ComplaintFilter::default()
            },
            UserRole::Manager => ComplaintFilter {
                status: query.status,
                department_id: actor.department_id.clone(),
                ..ComplaintFilter::default()
            },
            UserRole::Employee => ComplaintFilter {
                status: query.status,
                assignee_id: Some(actor.user_id.clone()),
                ..ComplaintFilter::default()
            },
            UserRole::Client => ComplaintFilter {
                status: query.status,
                client_id: Some(actor.user_id.clone()),
                ..ComplaintFilter::default()
            },
        };

        self.complaint_repo.list(&filter, limit, offset).await
    }

    /// Apply a status transition.
    ///
    /// Persists the new status, bumps `updated_at` and `version`, and
    /// appends exactly one history entry, all in a single transaction.
    /// Notification fan-out happens after commit and never rolls back the
    /// transition.
    pub async fn update_status(
        &self,
        actor: &ActorContext,
        id: &str,
        input: UpdateStatusInput,
    ) -> AppResult<complaint::Model> {
        input.validate()?;

        let complaint = self.complaint_repo.get_by_id(id).await?;

        if !workflow::can_transition(actor, &complaint, self.assignee_department(actor, &complaint).await?.as_deref()) {
            return Err(AppError::Forbidden(
                "You are not allowed to update this complaint".to_string(),
            ));
        }

        if let Some(expected) = input.expected_version {
            if expected != complaint.version {
                return Err(AppError::Conflict(format!(
                    "Complaint was modified by someone else (version {} != {})",
                    complaint.version, expected
                )));
            }
        }

        workflow::validate_transition(complaint.status, input.status, self.strict_order)?;

        let now = chrono::Utc::now();
        let new_status = input.status;
        let version = complaint.version + 1;

        let mut active: complaint::ActiveModel = complaint.into();
        active.status = Set(new_status);
        if input.remark.is_some() {
            active.remark = Set(input.remark);
        }
        active.version = Set(version);
        active.updated_at = Set(now.into());

        let entry = complaint_history::ActiveModel {
            id: Set(self.id_gen.generate()),
            complaint_id: Set(id.to_string()),
            status: Set(new_status),
            assigned_from: NotSet,
            assigned_to: NotSet,
            notes: Set(input.notes),
            created_at: Set(now.into()),
        };

        let (updated, _entry) = self.complaint_repo.update_with_history(active, entry).await?;

        self.dispatch_status_changed(&updated);

        Ok(updated)
    }

    /// Reassign a complaint to another user.
    ///
    /// Does not change the status; sets `first_assignee_id` only if it was
    /// never set. The history entry records both sides of the transfer.
    pub async fn reassign(
        &self,
        actor: &ActorContext,
        id: &str,
        input: ReassignInput,
    ) -> AppResult<complaint::Model> {
        input.validate()?;

        let complaint = self.complaint_repo.get_by_id(id).await?;

        if !workflow::can_reassign(actor, &complaint, self.assignee_department(actor, &complaint).await?.as_deref()) {
            return Err(AppError::Forbidden(
                "You are not allowed to reassign this complaint".to_string(),
            ));
        }

        if let Some(expected) = input.expected_version {
            if expected != complaint.version {
                return Err(AppError::Conflict(format!(
                    "Complaint was modified by someone else (version {} != {})",
                    complaint.version, expected
                )));
            }
        }

        let target = self.user_repo.get_by_id(&input.user_id).await?;
        workflow::check_reassign_target(actor, &target)?;

        if complaint.current_assignee_id.as_deref() == Some(target.id.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Complaint is already assigned to {}",
                target.username
            )));
        }

        let now = chrono::Utc::now();
        let previous = complaint.current_assignee_id.clone();
        let first_assignee = complaint.first_assignee_id.clone();
        let status = complaint.status;
        let version = complaint.version + 1;

        let mut active: complaint::ActiveModel = complaint.into();
        active.current_assignee_id = Set(Some(target.id.clone()));
        if first_assignee.is_none() {
            // First assignment ever; fixed from here on
            active.first_assignee_id = Set(Some(target.id.clone()));
        }
        active.version = Set(version);
        active.updated_at = Set(now.into());

        let entry = complaint_history::ActiveModel {
            id: Set(self.id_gen.generate()),
            complaint_id: Set(id.to_string()),
            status: Set(status),
            assigned_from: Set(previous),
            assigned_to: Set(Some(target.id.clone())),
            notes: Set(input.notes),
            created_at: Set(now.into()),
        };

        let (updated, _entry) = self.complaint_repo.update_with_history(active, entry).await?;

        self.dispatch_assigned(&updated);

        Ok(updated)
    }

    /// Hard-delete a complaint. Destructive, admin-only, outside the
    /// normal lifecycle.
    pub async fn delete(&self, actor: &ActorContext, id: &str) -> AppResult<()> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can delete complaints".to_string(),
            ));
        }

        // Resolve first so a bogus ID surfaces as not-found
        self.complaint_repo.get_by_id(id).await?;
        self.complaint_repo.delete(id).await
    }

    /// Department of the complaint's current assignee, looked up only when
    /// the manager relationship rule needs it.
    async fn assignee_department(
        &self,
        actor: &ActorContext,
        complaint: &complaint::Model,
    ) -> AppResult<Option<String>> {
        if actor.role != UserRole::Manager {
            return Ok(None);
        }
        if actor.department_id.as_deref() == Some(complaint.department_id.as_str()) {
            return Ok(None);
        }
        let Some(assignee_id) = complaint.current_assignee_id.as_deref() else {
            return Ok(None);
        };

        let assignee = self.user_repo.find_by_id(assignee_id).await?;
        Ok(assignee.and_then(|u| u.department_id))
    }

    async fn authorize_view(
        &self,
        actor: &ActorContext,
        complaint: &complaint::Model,
    ) -> AppResult<()> {
        let assignee_department = self.assignee_department(actor, complaint).await?;
        if workflow::can_view(actor, complaint, assignee_department.as_deref()) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You are not allowed to view this complaint".to_string(),
            ))
        }
    }

    fn dispatch_status_changed(&self, complaint: &complaint::Model) {
        if let Some(notifier) = self.notifier.clone() {
            let complaint = complaint.clone();
            tokio::spawn(async move {
                if let Err(e) = notifier.dispatch_status_changed(&complaint).await {
                    tracing::warn!(error = %e, complaint_id = %complaint.id, "Failed to dispatch status notification");
                }
            });
        }
    }

    fn dispatch_assigned(&self, complaint: &complaint::Model) {
        if let Some(notifier) = self.notifier.clone() {
            let complaint = complaint.clone();
            tokio::spawn(async move {
                if let Err(e) = notifier.dispatch_assigned(&complaint).await {
                    tracing::warn!(error = %e, complaint_id = %complaint.id, "Failed to dispatch assignment notification");
                }
            });
        }
    }

    async fn resolve_department(
        &self,
        input: &CreateComplaintInput,
    ) -> AppResult<desk_db::entities::department::Model> {
        if let Some(ref department_id) = input.department_id {
            let department = self.department_repo.get_by_id(department_id).await?;
            if !department.is_active {
                return Err(AppError::BadRequest(format!(
                    "Department {} is not accepting complaints",
                    department.name
                )));
            }
            return Ok(department);
        }

        if let Some(ref nature_type_id) = input.nature_type_id {
            let nature = self.nature_type_repo.get_by_id(nature_type_id).await?;
            if !nature.is_active {
                return Err(AppError::BadRequest(format!(
                    "Nature type {} is inactive",
                    nature.name
                )));
            }
            let department = self.department_repo.get_by_id(&nature.department_id).await?;
            if !department.is_active {
                return Err(AppError::BadRequest(format!(
                    "Department {} is not accepting complaints",
                    department.name
                )));
            }
            return Ok(department);
        }

        Err(AppError::BadRequest(
            "Either departmentId or natureTypeId is required".to_string(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use desk_db::entities::user;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn service(db: Arc<DatabaseConnection>, strict_order: bool) -> ComplaintService {
        ComplaintService::new(
            ComplaintRepository::new(db.clone()),
            ComplaintHistoryRepository::new(db.clone()),
            UserRepository::new(db.clone()),
            DepartmentRepository::new(db.clone()),
            NatureTypeRepository::new(db),
            strict_order,
        )
    }

    fn actor(role: UserRole, user_id: &str, department_id: Option<&str>) -> ActorContext {
        ActorContext::new(
            user_id.to_string(),
            role,
            department_id.map(std::string::ToString::to_string),
        )
    }

    fn test_complaint(
        id: &str,
        status: ComplaintStatus,
        assignee: Option<&str>,
    ) -> complaint::Model {
        complaint::Model {
            id: id.to_string(),
            title: "Wrong invoice total".to_string(),
            description: "The May invoice shows the wrong amount".to_string(),
            error_type: Some("billing".to_string()),
            error_screen: Some("invoices".to_string()),
            client_id: "client1".to_string(),
            nature_type_id: None,
            attachments: json!([]),
            status,
            department_id: "dept1".to_string(),
            current_assignee_id: assignee.map(std::string::ToString::to_string),
            first_assignee_id: assignee.map(std::string::ToString::to_string),
            remark: None,
            version: 1,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn test_user(id: &str, role: UserRole, department_id: Option<&str>, active: bool) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: id.to_string(),
            username_lower: id.to_string(),
            name: None,
            email: None,
            password_hash: "hash".to_string(),
            token: None,
            role,
            department_id: department_id.map(std::string::ToString::to_string),
            is_active: active,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn history_entry(complaint: &complaint::Model) -> complaint_history::Model {
        complaint_history::Model {
            id: "h1".to_string(),
            complaint_id: complaint.id.clone(),
            status: complaint.status,
            assigned_from: None,
            assigned_to: None,
            notes: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_client_cannot_update_status() {
        let complaint = test_complaint("c1", ComplaintStatus::New, Some("emp1"));
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[complaint]])
                .into_connection(),
        );

        let svc = service(db, false);
        let result = svc
            .update_status(
                &actor(UserRole::Client, "client1", None),
                "c1",
                UpdateStatusInput {
                    status: ComplaintStatus::InProgress,
                    notes: None,
                    remark: None,
                    expected_version: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_employee_not_assignee_cannot_update_status() {
        let complaint = test_complaint("c1", ComplaintStatus::New, Some("emp1"));
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[complaint]])
                .into_connection(),
        );

        let svc = service(db, false);
        let result = svc
            .update_status(
                &actor(UserRole::Employee, "emp2", Some("dept1")),
                "c1",
                UpdateStatusInput {
                    status: ComplaintStatus::InProgress,
                    notes: None,
                    remark: None,
                    expected_version: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_same_status_is_a_rejected_noop() {
        let complaint = test_complaint("c1", ComplaintStatus::InProgress, Some("emp1"));
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[complaint]])
                .into_connection(),
        );

        let svc = service(db, false);
        let result = svc
            .update_status(
                &actor(UserRole::Admin, "admin1", None),
                "c1",
                UpdateStatusInput {
                    status: ComplaintStatus::InProgress,
                    notes: None,
                    remark: None,
                    expected_version: None,
                },
            )
            .await;

        // Rejected without touching the database again: no history entry,
        // no updated_at bump
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_version_mismatch_is_a_conflict() {
        let complaint = test_complaint("c1", ComplaintStatus::New, Some("emp1"));
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[complaint]])
                .into_connection(),
        );

        let svc = service(db, false);
        let result = svc
            .update_status(
                &actor(UserRole::Admin, "admin1", None),
                "c1",
                UpdateStatusInput {
                    status: ComplaintStatus::Assigned,
                    notes: None,
                    remark: None,
                    expected_version: Some(7),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_strict_order_rejects_skip() {
        let complaint = test_complaint("c1", ComplaintStatus::New, Some("emp1"));
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[complaint]])
                .into_connection(),
        );

        let svc = service(db, true);
        let result = svc
            .update_status(
                &actor(UserRole::Admin, "admin1", None),
                "c1",
                UpdateStatusInput {
                    status: ComplaintStatus::Completed,
                    notes: None,
                    remark: None,
                    expected_version: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_assigned_employee_updates_status() {
        let complaint = test_complaint("c1", ComplaintStatus::New, Some("emp1"));
        let mut updated = complaint.clone();
        updated.status = ComplaintStatus::InProgress;
        updated.version = 2;
        let entry = history_entry(&updated);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[complaint]])
                .append_query_results([[updated.clone()]])
                .append_query_results([[entry]])
                .into_connection(),
        );

        let svc = service(db, false);
        let result = svc
            .update_status(
                &actor(UserRole::Employee, "emp1", Some("dept1")),
                "c1",
                UpdateStatusInput {
                    status: ComplaintStatus::InProgress,
                    notes: Some("working on it".to_string()),
                    remark: None,
                    expected_version: Some(1),
                },
            )
            .await
            .unwrap();

        assert_eq!(result.status, ComplaintStatus::InProgress);
        assert_eq!(result.version, 2);
    }

    #[tokio::test]
    async fn test_employee_cannot_reassign() {
        let complaint = test_complaint("c1", ComplaintStatus::New, Some("emp1"));
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[complaint]])
                .into_connection(),
        );

        let svc = service(db, false);
        let result = svc
            .reassign(
                &actor(UserRole::Employee, "emp1", Some("dept1")),
                "c1",
                ReassignInput {
                    user_id: "emp2".to_string(),
                    notes: None,
                    expected_version: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_reassign_to_inactive_target_rejected() {
        let complaint = test_complaint("c1", ComplaintStatus::New, Some("emp1"));
        let target = test_user("emp2", UserRole::Employee, Some("dept1"), false);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[complaint]])
                .append_query_results([[target]])
                .into_connection(),
        );

        let svc = service(db, false);
        let result = svc
            .reassign(
                &actor(UserRole::Manager, "mgr1", Some("dept1")),
                "c1",
                ReassignInput {
                    user_id: "emp2".to_string(),
                    notes: None,
                    expected_version: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_manager_reassigns_within_department() {
        let complaint = test_complaint("c1", ComplaintStatus::New, Some("emp1"));
        let target = test_user("emp2", UserRole::Employee, Some("dept1"), true);
        let mut updated = complaint.clone();
        updated.current_assignee_id = Some("emp2".to_string());
        updated.version = 2;
        let mut entry = history_entry(&updated);
        entry.assigned_from = Some("emp1".to_string());
        entry.assigned_to = Some("emp2".to_string());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[complaint]])
                .append_query_results([[target]])
                .append_query_results([[updated.clone()]])
                .append_query_results([[entry]])
                .into_connection(),
        );

        let svc = service(db, false);
        let result = svc
            .reassign(
                &actor(UserRole::Manager, "mgr1", Some("dept1")),
                "c1",
                ReassignInput {
                    user_id: "emp2".to_string(),
                    notes: Some("handing over".to_string()),
                    expected_version: None,
                },
            )
            .await
            .unwrap();

        // Status untouched by reassignment
        assert_eq!(result.status, ComplaintStatus::New);
        assert_eq!(result.current_assignee_id.as_deref(), Some("emp2"));
        // First assignee stays what it was
        assert_eq!(result.first_assignee_id.as_deref(), Some("emp1"));
    }

    #[tokio::test]
    async fn test_delete_requires_admin() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let svc = service(db, false);
        let result = svc
            .delete(&actor(UserRole::Manager, "mgr1", Some("dept1")), "c1")
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
