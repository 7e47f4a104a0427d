//! API endpoints.

mod auth;
mod complaints;
mod departments;
mod nature_types;
mod notifications;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/complaints", complaints::router())
        .nest("/users", users::router())
        .nest("/departments", departments::router())
        .nest("/nature-types", nature_types::router())
        .nest("/notifications", notifications::router())
}
