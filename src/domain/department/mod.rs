//! Department aggregate

pub mod model;
pub mod repository;

pub use model::Department;
pub use repository::DepartmentRepositoryInterface;
