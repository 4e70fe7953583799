//! Database entities module

pub mod department;
pub mod employee;
pub mod user;

pub use department::Entity as Department;
pub use employee::Entity as Employee;
pub use user::Entity as User;
