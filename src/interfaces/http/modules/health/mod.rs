//! Liveness and database reachability

pub mod handlers;

pub use handlers::*;
