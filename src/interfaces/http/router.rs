//! API router
//!
//! `/api/v1` carries the basic CRUD surface, `/api/v2` adds pagination and
//! partial updates. Staff routes are gated by the role permission table,
//! user administration by the admin role.

use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use super::error::ApiError;
use super::middleware::{admin_only, auth_middleware, authorize, optional_auth_middleware};
use super::modules::request_id::request_id_middleware;
use super::modules::{auth, departments, employees, health, users};
use super::AppState;
use crate::domain::DomainError;

/// Build the complete application router
pub fn create_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", v1_routes(&state))
        .nest("/api/v2", v2_routes(&state))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

fn v1_routes(state: &AppState) -> Router<AppState> {
    // Register is public, but an admin caller may assign a role
    let public = Router::new()
        .route("/register", post(auth::register))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ))
        .route("/login", post(auth::login));

    let session = Router::new()
        .route("/validate", get(auth::validate_token))
        .route("/me", get(auth::current_user))
        .route("/change-password", put(auth::change_password))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let staff = Router::new()
        .route(
            "/departments",
            get(departments::list_departments).post(departments::create_department),
        )
        .route(
            "/departments/{id}",
            get(departments::get_department)
                .put(departments::update_department)
                .delete(departments::delete_department),
        )
        .route(
            "/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/employees/{id}",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route_layer(middleware::from_fn(authorize))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let admin = Router::new()
        .route("/users", get(users::list_users))
        .route("/users/{id}", get(users::get_user).patch(users::update_user))
        .route_layer(middleware::from_fn(admin_only))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/auth", public.merge(session))
        .merge(staff)
        .merge(admin)
}

fn v2_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/departments",
            get(departments::list_departments_paged).post(departments::create_department),
        )
        .route(
            "/departments/{id}",
            get(departments::get_department)
                .put(departments::update_department)
                .patch(departments::patch_department)
                .delete(departments::delete_department),
        )
        .route(
            "/departments/{id}/employees",
            get(departments::list_department_employees),
        )
        .route(
            "/employees",
            get(employees::list_employees_paged).post(employees::create_employee),
        )
        .route(
            "/employees/{id}",
            get(employees::get_employee)
                .put(employees::update_employee)
                .patch(employees::patch_employee)
                .delete(employees::delete_employee),
        )
        .route_layer(middleware::from_fn(authorize))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

/// Top-level boundary: a panicking handler becomes the generic 500 envelope.
fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(panic = detail, "Handler panicked");

    ApiError(DomainError::Internal(format!("panic: {}", detail))).into_response()
}
