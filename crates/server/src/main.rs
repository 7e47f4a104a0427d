//! Desk server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use desk_api::{middleware::AppState, router as api_router};
use desk_common::Config;
use desk_core::{
    ComplaintService, DepartmentService, EmailService, NatureTypeService, NotificationService,
    UserService,
};
use desk_db::repositories::{
    ComplaintHistoryRepository, ComplaintRepository, DepartmentRepository, NatureTypeRepository,
    NotificationRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "desk=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting desk server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = desk_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    desk_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let complaint_repo = ComplaintRepository::new(Arc::clone(&db));
    let history_repo = ComplaintHistoryRepository::new(Arc::clone(&db));
    let department_repo = DepartmentRepository::new(Arc::clone(&db));
    let nature_type_repo = NatureTypeRepository::new(Arc::clone(&db));
    let notification_repo = NotificationRepository::new(Arc::clone(&db));

    // Initialize services
    let user_service = UserService::new(user_repo.clone());

    let email_service = EmailService::from_config(&config.mail)?;
    if email_service.is_enabled() {
        info!("Outbound mail enabled");
    }

    let mut notification_service =
        NotificationService::new(notification_repo, user_repo.clone());
    notification_service.set_email(email_service);

    let mut complaint_service = ComplaintService::new(
        complaint_repo,
        history_repo,
        user_repo.clone(),
        department_repo.clone(),
        nature_type_repo.clone(),
        config.workflow.strict_order,
    );
    complaint_service.set_notifier(notification_service.clone());

    let department_service = DepartmentService::new(department_repo.clone(), user_repo.clone());
    let nature_type_service = NatureTypeService::new(nature_type_repo, department_repo);

    // Create app state
    let state = AppState {
        user_service,
        complaint_service,
        department_service,
        nature_type_service,
        notification_service,
    };

    // Build router
    let app = axum::Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            desk_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
