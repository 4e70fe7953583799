//! Employee aggregate

pub mod model;
pub mod repository;

pub use model::Employee;
pub use repository::EmployeeRepositoryInterface;
