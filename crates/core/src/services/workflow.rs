//! Complaint workflow rules.
//!
//! The status state machine and the role×relationship authorization gates,
//! kept as pure functions so every rule is testable without a database.
//!
//! Canonical forward order:
//! `New → Assigned → InProgress → Completed → Done → Closed`.
//! By default any later status may be requested directly; with
//! `strict_order` enabled only the immediate next status is accepted.

use desk_common::{AppError, AppResult};
use desk_db::entities::{
    complaint::{self, ComplaintStatus},
    user::{self, UserRole},
};

use crate::services::actor::ActorContext;

/// Validate a requested status change against the current status.
///
/// Rejects same-status requests (no-op), requests for the initial status
/// (`New` is creation-only), and — in strict mode — anything but the
/// immediate next status in canonical order.
pub fn validate_transition(
    current: ComplaintStatus,
    requested: ComplaintStatus,
    strict_order: bool,
) -> AppResult<()> {
    if requested == current {
        return Err(AppError::BadRequest(format!(
            "Complaint is already in status {current}"
        )));
    }

    if requested == ComplaintStatus::New {
        return Err(AppError::BadRequest(
            "Cannot transition a complaint back to New".to_string(),
        ));
    }

    if strict_order && requested.rank() != current.rank() + 1 {
        return Err(AppError::BadRequest(format!(
            "Transition {current} → {requested} skips the canonical order"
        )));
    }

    Ok(())
}

/// Whether the actor may mutate the complaint's status.
///
/// `assignee_department_id` is the department of the complaint's current
/// assignee, when known; managers also control complaints assigned into
/// their team even when the complaint itself belongs to another department.
#[must_use]
pub fn can_transition(
    actor: &ActorContext,
    complaint: &complaint::Model,
    assignee_department_id: Option<&str>,
) -> bool {
    match actor.role {
        UserRole::Admin => true,
        UserRole::Manager => {
            actor.department_id.as_deref() == Some(complaint.department_id.as_str())
                || (assignee_department_id.is_some()
                    && actor.department_id.as_deref() == assignee_department_id)
        }
        UserRole::Employee => complaint.current_assignee_id.as_deref() == Some(&actor.user_id),
        UserRole::Client => false,
    }
}

/// Whether the actor may reassign the complaint at all.
///
/// Only admins and managers (under the manager relationship rule) may
/// reassign; employees are status-only, clients are read-only.
#[must_use]
pub fn can_reassign(
    actor: &ActorContext,
    complaint: &complaint::Model,
    assignee_department_id: Option<&str>,
) -> bool {
    match actor.role {
        UserRole::Admin => true,
        UserRole::Manager => {
            actor.department_id.as_deref() == Some(complaint.department_id.as_str())
                || (assignee_department_id.is_some()
                    && actor.department_id.as_deref() == assignee_department_id)
        }
        UserRole::Employee | UserRole::Client => false,
    }
}

/// Whether the target user is an eligible reassignment destination for the
/// actor.
///
/// The target must be active and hold an assignable role. Managers may hand
/// work to employees of their own department or escalate to managers of
/// other departments; admins may pick any assignable user.
pub fn check_reassign_target(actor: &ActorContext, target: &user::Model) -> AppResult<()> {
    if !target.is_active {
        return Err(AppError::BadRequest(format!(
            "User {} is inactive and cannot be assigned",
            target.username
        )));
    }

    if !target.role.is_assignable() {
        return Err(AppError::BadRequest(format!(
            "User {} cannot be assigned complaints",
            target.username
        )));
    }

    if actor.is_admin() {
        return Ok(());
    }

    let eligible = match target.role {
        UserRole::Employee => target.department_id == actor.department_id,
        UserRole::Manager => target.department_id != actor.department_id,
        UserRole::Admin | UserRole::Client => false,
    };

    if eligible {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "User {} is not an eligible assignee",
            target.username
        )))
    }
}

/// Whether the actor may read the complaint.
///
/// Clients see their own complaints; employees what is assigned to them;
/// managers their department's queue (including work assigned into their
/// team); admins everything.
#[must_use]
pub fn can_view(
    actor: &ActorContext,
    complaint: &complaint::Model,
    assignee_department_id: Option<&str>,
) -> bool {
    match actor.role {
        UserRole::Client => complaint.client_id == actor.user_id,
        _ => can_transition(actor, complaint, assignee_department_id),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn actor(role: UserRole, department_id: Option<&str>) -> ActorContext {
        ActorContext::new(
            "actor1".to_string(),
            role,
            department_id.map(std::string::ToString::to_string),
        )
    }

    fn test_complaint(department_id: &str, assignee: Option<&str>) -> complaint::Model {
        complaint::Model {
            id: "c1".to_string(),
            title: "Broken export".to_string(),
            description: "Export button does nothing".to_string(),
            error_type: None,
            error_screen: None,
            client_id: "client1".to_string(),
            nature_type_id: None,
            attachments: json!([]),
            status: ComplaintStatus::New,
            department_id: department_id.to_string(),
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

    // === validate_transition ===

    #[test]
    fn test_same_status_is_rejected() {
        let result = validate_transition(ComplaintStatus::InProgress, ComplaintStatus::InProgress, false);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_transition_back_to_new_is_rejected() {
        let result = validate_transition(ComplaintStatus::Assigned, ComplaintStatus::New, false);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_permissive_mode_allows_skips() {
        // Observed behavior: any later (or earlier non-New) status may be set
        validate_transition(ComplaintStatus::New, ComplaintStatus::Completed, false).unwrap();
        validate_transition(ComplaintStatus::Done, ComplaintStatus::InProgress, false).unwrap();
    }

    #[test]
    fn test_strict_mode_allows_only_the_next_step() {
        validate_transition(ComplaintStatus::New, ComplaintStatus::Assigned, true).unwrap();
        validate_transition(ComplaintStatus::Assigned, ComplaintStatus::InProgress, true).unwrap();

        let skip = validate_transition(ComplaintStatus::New, ComplaintStatus::Completed, true);
        assert!(matches!(skip, Err(AppError::BadRequest(_))));

        let backwards = validate_transition(ComplaintStatus::Done, ComplaintStatus::InProgress, true);
        assert!(matches!(backwards, Err(AppError::BadRequest(_))));
    }

    // === can_transition ===

    #[test]
    fn test_admin_may_transition_anything() {
        let complaint = test_complaint("dept1", Some("emp1"));
        assert!(can_transition(&actor(UserRole::Admin, None), &complaint, None));
    }

    #[test]
    fn test_manager_gated_by_department() {
        let complaint = test_complaint("dept1", Some("emp1"));

        assert!(can_transition(
            &actor(UserRole::Manager, Some("dept1")),
            &complaint,
            None
        ));
        assert!(!can_transition(
            &actor(UserRole::Manager, Some("dept2")),
            &complaint,
            None
        ));
    }

    #[test]
    fn test_manager_controls_work_assigned_into_their_team() {
        // Complaint belongs to dept1 but is assigned to a dept2 user
        let complaint = test_complaint("dept1", Some("emp2"));

        assert!(can_transition(
            &actor(UserRole::Manager, Some("dept2")),
            &complaint,
            Some("dept2")
        ));
    }

    #[test]
    fn test_employee_only_when_current_assignee() {
        let complaint = test_complaint("dept1", Some("actor1"));
        assert!(can_transition(
            &actor(UserRole::Employee, Some("dept1")),
            &complaint,
            None
        ));

        let other = test_complaint("dept1", Some("emp2"));
        assert!(!can_transition(
            &actor(UserRole::Employee, Some("dept1")),
            &other,
            None
        ));
    }

    #[test]
    fn test_client_never_transitions() {
        let complaint = test_complaint("dept1", Some("actor1"));
        assert!(!can_transition(&actor(UserRole::Client, None), &complaint, None));
    }

    // === can_reassign / check_reassign_target ===

    #[test]
    fn test_employee_may_not_reassign() {
        let complaint = test_complaint("dept1", Some("actor1"));
        assert!(!can_reassign(
            &actor(UserRole::Employee, Some("dept1")),
            &complaint,
            None
        ));
    }

    #[test]
    fn test_inactive_target_is_rejected() {
        let target = test_user("emp2", UserRole::Employee, Some("dept1"), false);
        let result = check_reassign_target(&actor(UserRole::Manager, Some("dept1")), &target);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_client_target_is_never_assignable() {
        let target = test_user("client2", UserRole::Client, None, true);
        let result = check_reassign_target(&actor(UserRole::Admin, None), &target);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_manager_assigns_own_department_employee() {
        let target = test_user("emp2", UserRole::Employee, Some("dept1"), true);
        check_reassign_target(&actor(UserRole::Manager, Some("dept1")), &target).unwrap();
    }

    #[test]
    fn test_manager_cannot_assign_foreign_employee() {
        let target = test_user("emp2", UserRole::Employee, Some("dept2"), true);
        let result = check_reassign_target(&actor(UserRole::Manager, Some("dept1")), &target);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_manager_escalates_to_other_department_manager() {
        let target = test_user("mgr2", UserRole::Manager, Some("dept2"), true);
        check_reassign_target(&actor(UserRole::Manager, Some("dept1")), &target).unwrap();

        // Not to a manager of their own department (that is themselves' peer)
        let own = test_user("mgr3", UserRole::Manager, Some("dept1"), true);
        let result = check_reassign_target(&actor(UserRole::Manager, Some("dept1")), &own);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    // === can_view ===

    #[test]
    fn test_client_views_only_own_complaints() {
        let mut complaint = test_complaint("dept1", Some("emp1"));
        complaint.client_id = "actor1".to_string();
        assert!(can_view(&actor(UserRole::Client, None), &complaint, None));

        complaint.client_id = "someone_else".to_string();
        assert!(!can_view(&actor(UserRole::Client, None), &complaint, None));
    }
}
