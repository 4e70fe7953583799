//! Shared handler state

use std::time::Instant;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::application::{DepartmentService, EmployeeService, UserService};
use crate::infrastructure::crypto::JwtConfig;
use crate::infrastructure::RepositoryProvider;

/// Everything the router hands to handlers and middleware.
///
/// Handlers extract only the service they need via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub departments: DepartmentService,
    pub employees: EmployeeService,
    /// `None` when running on the in-memory repositories
    pub db: Option<DatabaseConnection>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(repos: RepositoryProvider, jwt_config: JwtConfig, db: Option<DatabaseConnection>) -> Self {
        Self {
            users: UserService::new(repos.users.clone(), jwt_config),
            departments: DepartmentService::new(repos.departments.clone(), repos.employees.clone()),
            employees: EmployeeService::new(repos.employees, repos.departments),
            db,
            started_at: Instant::now(),
        }
    }
}

impl FromRef<AppState> for UserService {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for DepartmentService {
    fn from_ref(state: &AppState) -> Self {
        state.departments.clone()
    }
}

impl FromRef<AppState> for EmployeeService {
    fn from_ref(state: &AppState) -> Self {
        state.employees.clone()
    }
}
