//! Bundles one repository per aggregate behind trait objects

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::database::{SeaOrmDepartmentRepository, SeaOrmEmployeeRepository, SeaOrmUserRepository};
use super::storage::InMemoryRepository;
use crate::domain::{
    Department, DepartmentRepositoryInterface, Employee, EmployeeRepositoryInterface, User,
    UserRepositoryInterface,
};

/// Unified repository provider.
///
/// ```ignore
/// let repos = RepositoryProvider::sea_orm(db.clone());
/// let user = repos.users.find_by_username("joao").await?;
/// ```
#[derive(Clone)]
pub struct RepositoryProvider {
    pub users: Arc<dyn UserRepositoryInterface>,
    pub departments: Arc<dyn DepartmentRepositoryInterface>,
    pub employees: Arc<dyn EmployeeRepositoryInterface>,
}

impl RepositoryProvider {
    pub fn sea_orm(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            departments: Arc::new(SeaOrmDepartmentRepository::new(db.clone())),
            employees: Arc::new(SeaOrmEmployeeRepository::new(db)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryRepository::<User>::new()),
            departments: Arc::new(InMemoryRepository::<Department>::new()),
            employees: Arc::new(InMemoryRepository::<Employee>::new()),
        }
    }
}
