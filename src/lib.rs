//! # Staff Service
//!
//! CRUD REST API for employees, departments and user accounts with
//! stateless JWT authentication and role-based authorization.
//!
//! ## Architecture
//!
//! - **domain**: entities, value objects (CPF, email), role permission table,
//!   repository contracts and errors
//! - **application**: use-case services (identity, departments, employees)
//! - **infrastructure**: password hashing, token signing, SeaORM and
//!   in-memory repositories, shutdown handling
//! - **interfaces**: axum HTTP router, middleware and handlers
//! - **shared**: pagination types and helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, shutdown_signal, DatabaseConfig, RepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};
