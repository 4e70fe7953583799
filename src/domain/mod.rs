//! Domain layer: entities, value objects, repository contracts and errors.

pub mod department;
pub mod employee;
pub mod error;
pub mod repository;
pub mod user;
pub mod value_objects;

// Re-export commonly used types
pub use department::{Department, DepartmentRepositoryInterface};
pub use employee::{Employee, EmployeeRepositoryInterface};
pub use error::{DomainError, DomainResult};
pub use repository::{Identifiable, Repository};
pub use user::{Access, UpdateUserDto, User, UserRepositoryInterface, UserRole};
pub use value_objects::{Cpf, Email};
