//! Application layer: use-case services over the repository traits

pub mod identity;
pub mod staff;

pub use identity::{AuthResult, RegisterUser, UserService};
pub use staff::{
    DepartmentChanges, DepartmentService, EmployeeChanges, EmployeeService, NewDepartment,
    NewEmployee,
};
