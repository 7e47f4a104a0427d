//! User directory endpoints (admin).

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use desk_common::AppResult;
use desk_core::{CreateUserInput, UpdateUserInput};
use desk_db::entities::user::{self, UserRole};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// User response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
            email: u.email,
            role: u.role,
            department_id: u.department_id,
            is_active: u.is_active,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Create user request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub role: UserRole,

    pub department_id: Option<String>,
}

/// Create a user with an explicit role.
async fn create_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    req.validate()?;

    let input = CreateUserInput {
        username: req.username,
        password: req.password,
        name: req.name,
        email: req.email,
        role: req.role,
        department_id: req.department_id,
    };

    let user = state.user_service.create(&auth.actor(), input).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// List users request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersRequest {
    pub role: Option<UserRole>,
    pub department_id: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// List users.
async fn list_users(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(req): Query<ListUsersRequest>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state
        .user_service
        .list(
            &auth.actor(),
            req.role,
            req.department_id.as_deref(),
            req.limit.unwrap_or(50),
            req.offset.unwrap_or(0),
        )
        .await?;

    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

/// Get a user by ID.
async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get(&id).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Update user request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub role: Option<UserRole>,

    pub department_id: Option<String>,

    pub is_active: Option<bool>,
}

/// Update a user.
async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    req.validate()?;

    let input = UpdateUserInput {
        name: req.name,
        email: req.email,
        role: req.role,
        department_id: req.department_id,
        is_active: req.is_active,
    };

    let user = state.user_service.update(&auth.actor(), &id, input).await?;
    Ok(ApiResponse::ok(user.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/{id}", get(get_user).patch(update_user))
}
