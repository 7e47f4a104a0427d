//! Complaint endpoints.
//!
//! The lifecycle contract every role-specific UI consumes:
//!
//! - `GET /complaints/{id}` → `{ complaint, history }`
//! - `PATCH /complaints/{id}/status` — status transition
//! - `POST /complaints/{id}/assign` — reassignment
//! - `GET /complaints/{id}/history` — ordered audit trail

use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Json, Router,
};
use desk_common::AppResult;
use desk_core::{
    CreateComplaintInput, ListComplaintsQuery, ReassignInput, UpdateStatusInput,
};
use desk_db::entities::{
    complaint::{self, ComplaintStatus},
    complaint_history,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Complaint response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_screen: Option<String>,
    pub client_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nature_type_id: Option<String>,
    pub attachments: serde_json::Value,
    pub status: ComplaintStatus,
    pub department_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<complaint::Model> for ComplaintResponse {
    fn from(c: complaint::Model) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            error_type: c.error_type,
            error_screen: c.error_screen,
            client_id: c.client_id,
            nature_type_id: c.nature_type_id,
            attachments: c.attachments,
            status: c.status,
            department_id: c.department_id,
            current_assignee_id: c.current_assignee_id,
            first_assignee_id: c.first_assignee_id,
            remark: c.remark,
            version: c.version,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// History entry response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryResponse {
    pub id: String,
    pub status: ComplaintStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub timestamp: String,
}

impl From<complaint_history::Model> for HistoryEntryResponse {
    fn from(h: complaint_history::Model) -> Self {
        Self {
            id: h.id,
            status: h.status,
            assigned_from: h.assigned_from,
            assigned_to: h.assigned_to,
            notes: h.notes,
            timestamp: h.created_at.to_rfc3339(),
        }
    }
}

/// Create complaint request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintRequest {
    #[validate(length(min = 1, max = 512))]
    pub title: String,

    #[validate(length(min = 1, max = 8192))]
    pub description: String,

    pub error_type: Option<String>,
    pub error_screen: Option<String>,
    pub client_id: Option<String>,
    pub department_id: Option<String>,
    pub nature_type_id: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// Create a complaint.
async fn create_complaint(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateComplaintRequest>,
) -> AppResult<ApiResponse<ComplaintResponse>> {
    req.validate()?;

    let input = CreateComplaintInput {
        title: req.title,
        description: req.description,
        error_type: req.error_type,
        error_screen: req.error_screen,
        client_id: req.client_id,
        department_id: req.department_id,
        nature_type_id: req.nature_type_id,
        attachments: req.attachments,
    };

    let complaint = state
        .complaint_service
        .create(&auth.actor(), input)
        .await?;

    Ok(ApiResponse::ok(complaint.into()))
}

/// List complaints request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListComplaintsRequest {
    pub status: Option<ComplaintStatus>,
    pub department_id: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// List complaints visible to the caller.
async fn list_complaints(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(req): Query<ListComplaintsRequest>,
) -> AppResult<ApiResponse<Vec<ComplaintResponse>>> {
    let query = ListComplaintsQuery {
        status: req.status,
        department_id: req.department_id,
        limit: req.limit,
        offset: req.offset,
    };

    let complaints = state.complaint_service.list(&auth.actor(), query).await?;

    Ok(ApiResponse::ok(
        complaints.into_iter().map(Into::into).collect(),
    ))
}

/// Complaint-with-history response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintWithHistoryResponse {
    pub complaint: ComplaintResponse,
    /// Oldest first; an empty list is the valid state of a fresh complaint.
    pub history: Vec<HistoryEntryResponse>,
}

/// Get a complaint with its history.
async fn get_complaint(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ComplaintWithHistoryResponse>> {
    let result = state.complaint_service.get(&auth.actor(), &id).await?;

    Ok(ApiResponse::ok(ComplaintWithHistoryResponse {
        complaint: result.complaint.into(),
        history: result.history.into_iter().map(Into::into).collect(),
    }))
}

/// Get the ordered history of a complaint.
async fn get_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<HistoryEntryResponse>>> {
    let history = state
        .complaint_service
        .get_history(&auth.actor(), &id)
        .await?;

    Ok(ApiResponse::ok(history.into_iter().map(Into::into).collect()))
}

/// Status transition request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: ComplaintStatus,

    #[validate(length(max = 2048))]
    pub notes: Option<String>,

    #[validate(length(max = 2048))]
    pub remark: Option<String>,

    pub expected_version: Option<i32>,
}

/// Apply a status transition.
async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> AppResult<ApiResponse<ComplaintResponse>> {
    req.validate()?;

    let input = UpdateStatusInput {
        status: req.status,
        notes: req.notes,
        remark: req.remark,
        expected_version: req.expected_version,
    };

    let complaint = state
        .complaint_service
        .update_status(&auth.actor(), &id, input)
        .await?;

    Ok(ApiResponse::ok(complaint.into()))
}

/// Reassignment request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    #[validate(length(min = 1))]
    pub user_id: String,

    #[validate(length(max = 2048))]
    pub notes: Option<String>,

    pub expected_version: Option<i32>,
}

/// Reassign a complaint.
async fn assign(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AssignRequest>,
) -> AppResult<ApiResponse<ComplaintResponse>> {
    req.validate()?;

    let input = ReassignInput {
        user_id: req.user_id,
        notes: req.notes,
        expected_version: req.expected_version,
    };

    let complaint = state
        .complaint_service
        .reassign(&auth.actor(), &id, input)
        .await?;

    Ok(ApiResponse::ok(complaint.into()))
}

/// Deleted response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub ok: bool,
}

/// Hard-delete a complaint (admin only).
async fn delete_complaint(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<DeletedResponse>> {
    state.complaint_service.delete(&auth.actor(), &id).await?;
    Ok(ApiResponse::ok(DeletedResponse { ok: true }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_complaint).get(list_complaints))
        .route("/{id}", get(get_complaint).delete(delete_complaint))
        .route("/{id}/status", patch(update_status))
        .route("/{id}/assign", post(assign))
        .route("/{id}/history", get(get_history))
}
