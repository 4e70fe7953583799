use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::error;

use super::{db_err, page_limit};
use crate::domain::{
    Cpf, DomainError, DomainResult, Email, Employee, EmployeeRepositoryInterface, Identifiable,
    Repository,
};
use crate::infrastructure::database::entities::employee;

pub struct SeaOrmEmployeeRepository {
    db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Rows are written through the value objects, so a row that fails to
/// re-validate means the table was edited outside this service.
fn model_to_domain(model: employee::Model) -> DomainResult<Employee> {
    let id = model.id;
    let corrupt = |field: &str, e: DomainError| {
        error!(employee_id = id, field, error = %e, "Stored employee failed validation");
        DomainError::Internal(format!("employee {} has invalid {}", id, field))
    };

    let cpf = Cpf::new(&model.cpf).map_err(|e| corrupt("cpf", e))?;
    let email = Email::new(&model.email).map_err(|e| corrupt("email", e))?;

    Ok(Employee {
        id: model.id,
        full_name: model.full_name,
        cpf,
        email,
        phone: model.phone,
        position: model.position,
        salary_cents: model.salary_cents,
        hire_date: model.hire_date,
        department_id: model.department_id,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn models_to_domain(models: Vec<employee::Model>) -> DomainResult<Vec<Employee>> {
    models.into_iter().map(model_to_domain).collect()
}

fn err(e: sea_orm::DbErr) -> DomainError {
    db_err(Employee::ENTITY, e)
}

#[async_trait]
impl Repository<Employee> for SeaOrmEmployeeRepository {
    async fn create(&self, item: Employee) -> DomainResult<Employee> {
        let active = employee::ActiveModel {
            id: NotSet,
            full_name: Set(item.full_name),
            cpf: Set(item.cpf.digits().to_string()),
            email: Set(item.email.into_inner()),
            phone: Set(item.phone),
            position: Set(item.position),
            salary_cents: Set(item.salary_cents),
            hire_date: Set(item.hire_date),
            department_id: Set(item.department_id),
            is_active: Set(item.is_active),
            created_at: Set(item.created_at),
            updated_at: Set(item.updated_at),
        };

        let model = active.insert(&self.db).await.map_err(err)?;
        model_to_domain(model)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Employee>> {
        let model = employee::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(err)?;

        model.map(model_to_domain).transpose()
    }

    async fn update(&self, item: Employee) -> DomainResult<Employee> {
        let id = item.id;
        let active = employee::ActiveModel {
            id: Set(item.id),
            full_name: Set(item.full_name),
            cpf: Set(item.cpf.digits().to_string()),
            email: Set(item.email.into_inner()),
            phone: Set(item.phone),
            position: Set(item.position),
            salary_cents: Set(item.salary_cents),
            hire_date: Set(item.hire_date),
            department_id: Set(item.department_id),
            is_active: Set(item.is_active),
            created_at: Set(item.created_at),
            updated_at: Set(item.updated_at),
        };

        let updated = active.update(&self.db).await.map_err(|e| match err(e) {
            DomainError::NotFound { .. } => DomainError::not_found(Employee::ENTITY, id),
            other => other,
        })?;

        model_to_domain(updated)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = employee::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(Employee::ENTITY, id));
        }

        Ok(())
    }

    async fn list(&self, offset: u64, limit: u64) -> DomainResult<Vec<Employee>> {
        let models = employee::Entity::find()
            .order_by_asc(employee::Column::Id)
            .offset(offset)
            .limit(page_limit(limit))
            .all(&self.db)
            .await
            .map_err(err)?;

        models_to_domain(models)
    }

    async fn count(&self) -> DomainResult<u64> {
        employee::Entity::find().count(&self.db).await.map_err(err)
    }
}

#[async_trait]
impl EmployeeRepositoryInterface for SeaOrmEmployeeRepository {
    async fn find_by_cpf(&self, cpf: &Cpf) -> DomainResult<Option<Employee>> {
        let model = employee::Entity::find()
            .filter(employee::Column::Cpf.eq(cpf.digits()))
            .one(&self.db)
            .await
            .map_err(err)?;

        model.map(model_to_domain).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Employee>> {
        let model = employee::Entity::find()
            .filter(employee::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await
            .map_err(err)?;

        model.map(model_to_domain).transpose()
    }

    async fn list_by_department(
        &self,
        department_id: i64,
        offset: u64,
        limit: u64,
    ) -> DomainResult<Vec<Employee>> {
        let models = employee::Entity::find()
            .filter(employee::Column::DepartmentId.eq(department_id))
            .order_by_asc(employee::Column::Id)
            .offset(offset)
            .limit(page_limit(limit))
            .all(&self.db)
            .await
            .map_err(err)?;

        models_to_domain(models)
    }

    async fn count_by_department(&self, department_id: i64) -> DomainResult<u64> {
        employee::Entity::find()
            .filter(employee::Column::DepartmentId.eq(department_id))
            .count(&self.db)
            .await
            .map_err(err)
    }
}
