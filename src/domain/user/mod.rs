//! User aggregate
//!
//! Contains the User entity, role permission table, DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto_update;

pub use model::{Access, User, UserRole};

pub use dto_update::UpdateUserDto;

pub use repository::UserRepositoryInterface;
