//! Department repository interface

use async_trait::async_trait;

use super::Department;
use crate::domain::{DomainResult, Repository};

#[async_trait]
pub trait DepartmentRepositoryInterface: Repository<Department> {
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Department>>;
}
