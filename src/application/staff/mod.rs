//! Staff records: departments and the employees assigned to them

pub mod departments;
pub mod employees;

pub use departments::{DepartmentChanges, DepartmentService, NewDepartment};
pub use employees::{EmployeeChanges, EmployeeService, NewEmployee};
