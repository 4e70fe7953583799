//! Department use-cases

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{
    Department, DepartmentRepositoryInterface, DomainError, DomainResult, Employee,
    EmployeeRepositoryInterface, Identifiable,
};
use crate::shared::{required_text, PageRequest, PaginatedResult};

#[derive(Debug, Clone)]
pub struct NewDepartment {
    pub name: String,
    pub description: Option<String>,
}

/// Field changes; `None` keeps the stored value.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct DepartmentChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

#[derive(Clone)]
pub struct DepartmentService {
    departments: Arc<dyn DepartmentRepositoryInterface>,
    employees: Arc<dyn EmployeeRepositoryInterface>,
}

impl DepartmentService {
    pub fn new(
        departments: Arc<dyn DepartmentRepositoryInterface>,
        employees: Arc<dyn EmployeeRepositoryInterface>,
    ) -> Self {
        Self {
            departments,
            employees,
        }
    }

    pub async fn create(&self, input: NewDepartment) -> DomainResult<Department> {
        let name = required_text("name", &input.name, 2, 100)?;
        self.ensure_name_free(&name, None).await?;

        let now = Utc::now();
        let department = self
            .departments
            .create(Department {
                id: 0,
                name,
                description: normalize(input.description),
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(department_id = department.id, name = %department.name, "Department created");
        Ok(department)
    }

    pub async fn get(&self, id: i64) -> DomainResult<Department> {
        self.departments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(Department::ENTITY, id))
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Department>> {
        self.departments.list_all().await
    }

    pub async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<Department>> {
        let total = self.departments.count().await?;
        let items = self.departments.list(page.offset(), page.page_size).await?;
        Ok(PaginatedResult::new(items, total, page))
    }

    pub async fn update(&self, id: i64, changes: DepartmentChanges) -> DomainResult<Department> {
        let mut department = self.get(id).await?;

        if let Some(name) = changes.name {
            let name = required_text("name", &name, 2, 100)?;
            self.ensure_name_free(&name, Some(id)).await?;
            department.name = name;
        }
        if let Some(description) = changes.description {
            department.description = normalize(description);
        }
        if let Some(is_active) = changes.is_active {
            department.is_active = is_active;
        }
        department.updated_at = Utc::now();

        let department = self.departments.update(department).await?;
        info!(department_id = id, "Department updated");
        Ok(department)
    }

    /// Refuses while employees still reference the department.
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.get(id).await?;

        let staffed = self.employees.count_by_department(id).await?;
        if staffed > 0 {
            return Err(DomainError::validation(format!(
                "Department still has {} employee(s)",
                staffed
            )));
        }

        self.departments.delete(id).await?;
        info!(department_id = id, "Department deleted");
        Ok(())
    }

    pub async fn list_employees(
        &self,
        id: i64,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Employee>> {
        self.get(id).await?;

        let total = self.employees.count_by_department(id).await?;
        let items = self
            .employees
            .list_by_department(id, page.offset(), page.page_size)
            .await?;
        Ok(PaginatedResult::new(items, total, page))
    }

    async fn ensure_name_free(&self, name: &str, own_id: Option<i64>) -> DomainResult<()> {
        match self.departments.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != own_id => Err(DomainError::Duplicate(
                "Department name already exists".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// Trim, and treat blank as absent.
fn normalize(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
