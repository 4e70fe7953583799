use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{db_err, page_limit};
use crate::domain::{
    Department, DepartmentRepositoryInterface, DomainError, DomainResult, Identifiable, Repository,
};
use crate::infrastructure::database::entities::department;

pub struct SeaOrmDepartmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmDepartmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(model: department::Model) -> Department {
    Department {
        id: model.id,
        name: model.name,
        description: model.description,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn err(e: sea_orm::DbErr) -> DomainError {
    db_err(Department::ENTITY, e)
}

#[async_trait]
impl Repository<Department> for SeaOrmDepartmentRepository {
    async fn create(&self, item: Department) -> DomainResult<Department> {
        let active = department::ActiveModel {
            id: NotSet,
            name: Set(item.name),
            description: Set(item.description),
            is_active: Set(item.is_active),
            created_at: Set(item.created_at),
            updated_at: Set(item.updated_at),
        };

        let model = active.insert(&self.db).await.map_err(err)?;
        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Department>> {
        let model = department::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(err)?;

        Ok(model.map(model_to_domain))
    }

    async fn update(&self, item: Department) -> DomainResult<Department> {
        let id = item.id;
        let active = department::ActiveModel {
            id: Set(item.id),
            name: Set(item.name),
            description: Set(item.description),
            is_active: Set(item.is_active),
            created_at: Set(item.created_at),
            updated_at: Set(item.updated_at),
        };

        let updated = active.update(&self.db).await.map_err(|e| match err(e) {
            DomainError::NotFound { .. } => DomainError::not_found(Department::ENTITY, id),
            other => other,
        })?;

        Ok(model_to_domain(updated))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = department::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(Department::ENTITY, id));
        }

        Ok(())
    }

    async fn list(&self, offset: u64, limit: u64) -> DomainResult<Vec<Department>> {
        let models = department::Entity::find()
            .order_by_asc(department::Column::Id)
            .offset(offset)
            .limit(page_limit(limit))
            .all(&self.db)
            .await
            .map_err(err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        department::Entity::find().count(&self.db).await.map_err(err)
    }
}

#[async_trait]
impl DepartmentRepositoryInterface for SeaOrmDepartmentRepository {
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Department>> {
        let model = department::Entity::find()
            .filter(department::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(err)?;

        Ok(model.map(model_to_domain))
    }
}
