//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use desk_core::{
    ComplaintService, DepartmentService, NatureTypeService, NotificationService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub complaint_service: ComplaintService,
    pub department_service: DepartmentService,
    pub nature_type_service: NatureTypeService,
    pub notification_service: NotificationService,
}

/// Authentication middleware.
///
/// Resolves a bearer token to a user row and stores it in request
/// extensions; handlers pick it up through the `AuthUser` extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        // Authenticate user by token
        if let Ok(user) = state.user_service.authenticate_by_token(token).await {
            req.extensions_mut().insert(user);
        }
    }

    next.run(req).await
}
