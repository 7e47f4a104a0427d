//! Notification service.
//!
//! Writes the in-app inbox rows for lifecycle events and hands each
//! recipient to the mail sender. Invoked once per successful transition or
//! reassignment; a delivery failure is logged, never propagated back into
//! the lifecycle write.

use desk_common::{AppResult, IdGenerator};
use desk_db::{
    entities::{
        complaint,
        notification::{self, NotificationKind},
    },
    repositories::{NotificationRepository, UserRepository},
};
use sea_orm::Set;

use crate::services::email::EmailService;

/// Notification service.
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    user_repo: UserRepository,
    email: Option<EmailService>,
    id_gen: IdGenerator,
}

impl NotificationService {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(notification_repo: NotificationRepository, user_repo: UserRepository) -> Self {
        Self {
            notification_repo,
            user_repo,
            email: None,
            id_gen: IdGenerator::new(),
        }
    }

    /// Attach the outbound mail sender.
    pub fn set_email(&mut self, email: EmailService) {
        self.email = Some(email);
    }

    /// Fan out a status-change event to the complaint's client and current
    /// assignee.
    pub async fn dispatch_status_changed(&self, complaint: &complaint::Model) -> AppResult<()> {
        let body = format!(
            "Complaint \"{}\" moved to {}",
            complaint.title, complaint.status
        );
        self.fan_out(complaint, NotificationKind::StatusChanged, &body)
            .await
    }

    /// Fan out a reassignment event to the complaint's client and new
    /// assignee.
    pub async fn dispatch_assigned(&self, complaint: &complaint::Model) -> AppResult<()> {
        let body = format!("Complaint \"{}\" was reassigned", complaint.title);
        self.fan_out(complaint, NotificationKind::Assigned, &body).await
    }

    async fn fan_out(
        &self,
        complaint: &complaint::Model,
        kind: NotificationKind,
        body: &str,
    ) -> AppResult<()> {
        let mut recipients = vec![complaint.client_id.clone()];
        if let Some(ref assignee_id) = complaint.current_assignee_id {
            if *assignee_id != complaint.client_id {
                recipients.push(assignee_id.clone());
            }
        }

        for recipient_id in recipients {
            let model = notification::ActiveModel {
                id: Set(self.id_gen.generate()),
                recipient_id: Set(recipient_id.clone()),
                complaint_id: Set(complaint.id.clone()),
                kind: Set(kind),
                body: Set(body.to_string()),
                is_read: Set(false),
                created_at: Set(chrono::Utc::now().into()),
            };
            self.notification_repo.create(model).await?;

            self.send_mail(&recipient_id, complaint, body).await;
        }

        Ok(())
    }

    /// Best-effort mail delivery; a failed send is logged and dropped.
    async fn send_mail(&self, recipient_id: &str, complaint: &complaint::Model, body: &str) {
        let Some(ref email) = self.email else {
            return;
        };

        let recipient = match self.user_repo.find_by_id(recipient_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, recipient_id, "Failed to resolve mail recipient");
                return;
            }
        };

        let Some(address) = recipient.email else {
            return;
        };

        let subject = format!("[desk] Update on \"{}\"", complaint.title);
        if let Err(e) = email.send(&address, &subject, body).await {
            tracing::warn!(error = %e, recipient_id, "Failed to send notification mail");
        }
    }

    /// Get notifications for a user (paginated, newest first).
    pub async fn get_notifications(
        &self,
        user_id: &str,
        limit: u64,
        until_id: Option<&str>,
        unread_only: bool,
    ) -> AppResult<Vec<notification::Model>> {
        self.notification_repo
            .find_by_recipient(user_id, limit, until_id, unread_only)
            .await
    }

    /// Mark a notification as read.
    pub async fn mark_as_read(&self, user_id: &str, notification_id: &str) -> AppResult<()> {
        // Verify the notification belongs to the user
        let notification = self.notification_repo.find_by_id(notification_id).await?;
        if let Some(n) = notification
            && n.recipient_id == user_id
        {
            self.notification_repo.mark_as_read(notification_id).await?;
        }
        Ok(())
    }

    /// Mark all notifications as read for a user.
    pub async fn mark_all_as_read(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.mark_all_as_read(user_id).await
    }

    /// Count unread notifications for a user.
    pub async fn count_unread(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.count_unread(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_notification(id: &str, recipient_id: &str) -> notification::Model {
        notification::Model {
            id: id.to_string(),
            recipient_id: recipient_id.to_string(),
            complaint_id: "c1".to_string(),
            kind: NotificationKind::Assigned,
            body: "Complaint \"x\" was reassigned".to_string(),
            is_read: false,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_mark_as_read_ignores_foreign_notifications() {
        let n = test_notification("n1", "someone_else");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[n]])
                .into_connection(),
        );

        let svc = NotificationService::new(
            NotificationRepository::new(db.clone()),
            UserRepository::new(db),
        );

        // No further query results are queued: if the service tried to
        // update, the mock would fail the test
        svc.mark_as_read("user1", "n1").await.unwrap();
    }

    #[tokio::test]
    async fn test_get_notifications_scoped_to_recipient() {
        let n = test_notification("n1", "user1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[n]])
                .into_connection(),
        );

        let svc = NotificationService::new(
            NotificationRepository::new(db.clone()),
            UserRepository::new(db),
        );

        let result = svc.get_notifications("user1", 10, None, false).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].recipient_id, "user1");
    }
}
