//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::AccountService;

use super::common::ErrorBody;
use super::modules::health::{self, ComponentHealth, HealthResponse, HealthState};
use super::modules::metrics::{http_metrics_middleware, metrics_routes};
use super::modules::request_id::request_id_middleware;
use super::modules::users::{
    self, AccountDto, CreateUserRequest, DeleteUserRequest, UpdatePasswordRequest, UsersState,
};

/// Resource path of the account API
pub const USERS_PATH: &str = "/api/users";

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Users
        users::handlers::list_users,
        users::handlers::create_user,
        users::handlers::delete_user,
        users::handlers::update_password,
    ),
    components(
        schemas(
            HealthResponse,
            ComponentHealth,
            AccountDto,
            CreateUserRequest,
            DeleteUserRequest,
            UpdatePasswordRequest,
            ErrorBody,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Users", description = "Account CRUD with role-specific creation. Any other method on /api/users answers 405."),
    ),
    info(
        title = "Account Service API",
        version = "0.1.0",
        description = "User account management: list, create (normal, admin, superadmin), change password, delete",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Routes for the account resource alone, already bound to their state.
pub fn users_routes(accounts: AccountService) -> Router {
    Router::new()
        .route(USERS_PATH, any(users::users_endpoint))
        .with_state(UsersState { accounts })
}

/// Create the API router with all routes
pub fn create_api_router(
    accounts: AccountService,
    db: DatabaseConnection,
    prometheus: PrometheusHandle,
) -> Router {
    let health_state = HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // CORS configuration; the presentation tier is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes(prometheus))
        .merge(users_routes(accounts))
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
