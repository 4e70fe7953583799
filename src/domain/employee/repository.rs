//! Employee repository interface

use async_trait::async_trait;

use super::Employee;
use crate::domain::value_objects::{Cpf, Email};
use crate::domain::{DomainResult, Repository};

#[async_trait]
pub trait EmployeeRepositoryInterface: Repository<Employee> {
    async fn find_by_cpf(&self, cpf: &Cpf) -> DomainResult<Option<Employee>>;
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Employee>>;

    async fn list_by_department(
        &self,
        department_id: i64,
        offset: u64,
        limit: u64,
    ) -> DomainResult<Vec<Employee>>;
    async fn count_by_department(&self, department_id: i64) -> DomainResult<u64>;
}
