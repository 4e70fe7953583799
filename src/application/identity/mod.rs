//! Identity module: user management & authentication
//!
//! Contains the `UserService` which orchestrates all user-related
//! use-cases: login, registration, password changes, account administration.

pub mod service;

pub use service::{AuthResult, RegisterUser, UserService};
