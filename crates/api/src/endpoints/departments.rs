//! Department directory endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use desk_common::AppResult;
use desk_core::{CreateDepartmentInput, UpdateDepartmentInput};
use desk_db::entities::department;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::endpoints::users::UserResponse;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Department response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_assignee_id: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl From<department::Model> for DepartmentResponse {
    fn from(d: department::Model) -> Self {
        Self {
            id: d.id,
            name: d.name,
            manager_id: d.manager_id,
            default_assignee_id: d.default_assignee_id,
            is_active: d.is_active,
            created_at: d.created_at.to_rfc3339(),
        }
    }
}

/// Create department request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    pub manager_id: Option<String>,

    pub default_assignee_id: Option<String>,
}

/// Create a department.
async fn create_department(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateDepartmentRequest>,
) -> AppResult<ApiResponse<DepartmentResponse>> {
    req.validate()?;

    let input = CreateDepartmentInput {
        name: req.name,
        manager_id: req.manager_id,
        default_assignee_id: req.default_assignee_id,
    };

    let department = state
        .department_service
        .create(&auth.actor(), input)
        .await?;

    Ok(ApiResponse::ok(department.into()))
}

/// List departments request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDepartmentsRequest {
    #[serde(default)]
    pub active_only: bool,
}

/// List departments.
async fn list_departments(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(req): Query<ListDepartmentsRequest>,
) -> AppResult<ApiResponse<Vec<DepartmentResponse>>> {
    let departments = state.department_service.list(req.active_only).await?;
    Ok(ApiResponse::ok(
        departments.into_iter().map(Into::into).collect(),
    ))
}

/// Get a department by ID.
async fn get_department(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<DepartmentResponse>> {
    let department = state.department_service.get(&id).await?;
    Ok(ApiResponse::ok(department.into()))
}

/// Update department request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    pub manager_id: Option<String>,

    pub default_assignee_id: Option<String>,

    pub is_active: Option<bool>,
}

/// Update a department.
async fn update_department(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDepartmentRequest>,
) -> AppResult<ApiResponse<DepartmentResponse>> {
    req.validate()?;

    let input = UpdateDepartmentInput {
        name: req.name,
        manager_id: req.manager_id,
        default_assignee_id: req.default_assignee_id,
        is_active: req.is_active,
    };

    let department = state
        .department_service
        .update(&auth.actor(), &id, input)
        .await?;

    Ok(ApiResponse::ok(department.into()))
}

/// Eligible reassignment targets for a department: its own active
/// employees plus active managers of other departments.
async fn eligible_assignees(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    // Resolve the department first so a bogus ID surfaces as not-found
    state.department_service.get(&id).await?;

    let assignees = state.user_service.eligible_assignees(&id).await?;
    Ok(ApiResponse::ok(
        assignees.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_department).get(list_departments))
        .route("/{id}", get(get_department).patch(update_department))
        .route("/{id}/assignees", get(eligible_assignees))
}
