//! Department endpoints (v1 CRUD, v2 paging and partial updates)

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
