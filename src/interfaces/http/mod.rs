//! HTTP REST API interfaces
//!
//! - `middleware`: bearer-token authentication and role gates
//! - `modules`: DTOs and handlers per resource
//! - `router`: versioned route table and the outer layer stack

pub mod common;
pub mod error;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::create_api_router;
pub use state::AppState;
