//! Employee use-cases

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::domain::{
    Cpf, DepartmentRepositoryInterface, DomainError, DomainResult, Email, Employee,
    EmployeeRepositoryInterface, Identifiable,
};
use crate::shared::{required_text, PageRequest, PaginatedResult};

/// Raw employee input; CPF and email are validated by the service.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub full_name: String,
    pub cpf: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub salary_cents: i64,
    pub hire_date: NaiveDate,
    pub department_id: i64,
}

/// Field changes; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub full_name: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub position: Option<String>,
    pub salary_cents: Option<i64>,
    pub hire_date: Option<NaiveDate>,
    pub department_id: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepositoryInterface>,
    departments: Arc<dyn DepartmentRepositoryInterface>,
}

impl EmployeeService {
    pub fn new(
        employees: Arc<dyn EmployeeRepositoryInterface>,
        departments: Arc<dyn DepartmentRepositoryInterface>,
    ) -> Self {
        Self {
            employees,
            departments,
        }
    }

    pub async fn create(&self, input: NewEmployee) -> DomainResult<Employee> {
        let full_name = required_text("full_name", &input.full_name, 2, 150)?;
        let position = required_text("position", &input.position, 2, 100)?;
        let cpf = Cpf::new(&input.cpf)?;
        let email = Email::new(&input.email)?;
        check_salary(input.salary_cents)?;
        self.ensure_department(input.department_id).await?;
        self.ensure_unique(&cpf, &email, None).await?;

        let now = Utc::now();
        let employee = self
            .employees
            .create(Employee {
                id: 0,
                full_name,
                cpf,
                email,
                phone: normalize(input.phone),
                position,
                salary_cents: input.salary_cents,
                hire_date: input.hire_date,
                department_id: input.department_id,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(
            employee_id = employee.id,
            department_id = employee.department_id,
            "Employee created"
        );
        Ok(employee)
    }

    pub async fn get(&self, id: i64) -> DomainResult<Employee> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(Employee::ENTITY, id))
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Employee>> {
        self.employees.list_all().await
    }

    pub async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<Employee>> {
        let total = self.employees.count().await?;
        let items = self.employees.list(page.offset(), page.page_size).await?;
        Ok(PaginatedResult::new(items, total, page))
    }

    pub async fn update(&self, id: i64, changes: EmployeeChanges) -> DomainResult<Employee> {
        let mut employee = self.get(id).await?;

        if let Some(full_name) = changes.full_name {
            employee.full_name = required_text("full_name", &full_name, 2, 150)?;
        }
        if let Some(position) = changes.position {
            employee.position = required_text("position", &position, 2, 100)?;
        }
        if let Some(cpf) = changes.cpf {
            employee.cpf = Cpf::new(&cpf)?;
        }
        if let Some(email) = changes.email {
            employee.email = Email::new(&email)?;
        }
        if let Some(salary_cents) = changes.salary_cents {
            check_salary(salary_cents)?;
            employee.salary_cents = salary_cents;
        }
        if let Some(department_id) = changes.department_id {
            self.ensure_department(department_id).await?;
            employee.department_id = department_id;
        }
        self.ensure_unique(&employee.cpf, &employee.email, Some(id))
            .await?;

        if let Some(phone) = changes.phone {
            employee.phone = normalize(phone);
        }
        if let Some(hire_date) = changes.hire_date {
            employee.hire_date = hire_date;
        }
        if let Some(is_active) = changes.is_active {
            employee.is_active = is_active;
        }
        employee.updated_at = Utc::now();

        let employee = self.employees.update(employee).await?;
        info!(employee_id = id, "Employee updated");
        Ok(employee)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.employees.delete(id).await?;
        info!(employee_id = id, "Employee deleted");
        Ok(())
    }

    async fn ensure_department(&self, department_id: i64) -> DomainResult<()> {
        if self.departments.find_by_id(department_id).await?.is_none() {
            return Err(DomainError::validation(format!(
                "Department {} does not exist",
                department_id
            )));
        }
        Ok(())
    }

    async fn ensure_unique(&self, cpf: &Cpf, email: &Email, own_id: Option<i64>) -> DomainResult<()> {
        if let Some(other) = self.employees.find_by_cpf(cpf).await? {
            if Some(other.id) != own_id {
                return Err(DomainError::Duplicate("CPF already registered".into()));
            }
        }
        if let Some(other) = self.employees.find_by_email(email).await? {
            if Some(other.id) != own_id {
                return Err(DomainError::Duplicate("Email already registered".into()));
            }
        }
        Ok(())
    }
}

fn check_salary(salary_cents: i64) -> DomainResult<()> {
    if salary_cents < 0 {
        return Err(DomainError::validation("Salary must not be negative"));
    }
    Ok(())
}

fn normalize(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
