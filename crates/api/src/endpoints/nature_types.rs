//! Nature type endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use desk_common::AppResult;
use desk_core::{CreateNatureTypeInput, UpdateNatureTypeInput};
use desk_db::entities::nature_type;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Nature type response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NatureTypeResponse {
    pub id: String,
    pub name: String,
    pub department_id: String,
    pub is_active: bool,
}

impl From<nature_type::Model> for NatureTypeResponse {
    fn from(n: nature_type::Model) -> Self {
        Self {
            id: n.id,
            name: n.name,
            department_id: n.department_id,
            is_active: n.is_active,
        }
    }
}

/// Create nature type request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNatureTypeRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    pub department_id: String,
}

/// Create a nature type.
async fn create_nature_type(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateNatureTypeRequest>,
) -> AppResult<ApiResponse<NatureTypeResponse>> {
    req.validate()?;

    let input = CreateNatureTypeInput {
        name: req.name,
        department_id: req.department_id,
    };

    let nature = state
        .nature_type_service
        .create(&auth.actor(), input)
        .await?;

    Ok(ApiResponse::ok(nature.into()))
}

/// List nature types request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNatureTypesRequest {
    #[serde(default)]
    pub active_only: bool,
}

/// List nature types.
async fn list_nature_types(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(req): Query<ListNatureTypesRequest>,
) -> AppResult<ApiResponse<Vec<NatureTypeResponse>>> {
    let natures = state.nature_type_service.list(req.active_only).await?;
    Ok(ApiResponse::ok(natures.into_iter().map(Into::into).collect()))
}

/// Get a nature type by ID.
async fn get_nature_type(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<NatureTypeResponse>> {
    let nature = state.nature_type_service.get(&id).await?;
    Ok(ApiResponse::ok(nature.into()))
}

/// Update nature type request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNatureTypeRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    pub department_id: Option<String>,

    pub is_active: Option<bool>,
}

/// Update a nature type.
async fn update_nature_type(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateNatureTypeRequest>,
) -> AppResult<ApiResponse<NatureTypeResponse>> {
    req.validate()?;

    let input = UpdateNatureTypeInput {
        name: req.name,
        department_id: req.department_id,
        is_active: req.is_active,
    };

    let nature = state
        .nature_type_service
        .update(&auth.actor(), &id, input)
        .await?;

    Ok(ApiResponse::ok(nature.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_nature_type).get(list_nature_types))
        .route("/{id}", get(get_nature_type).patch(update_nature_type))
}
