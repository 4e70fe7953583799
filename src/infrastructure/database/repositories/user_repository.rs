use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{db_err, page_limit};
use crate::domain::{
    DomainError, DomainResult, Identifiable, Repository, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Manager => UserRole::Manager,
        user::UserRole::Employee => UserRole::Employee,
        user::UserRole::Viewer => UserRole::Viewer,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Manager => user::UserRole::Manager,
        UserRole::Employee => user::UserRole::Employee,
        UserRole::Viewer => user::UserRole::Viewer,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        full_name: model.full_name,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        is_active: model.is_active,
        created_at: model.created_at,
        last_login_at: model.last_login_at,
    }
}

fn err(e: sea_orm::DbErr) -> DomainError {
    db_err(User::ENTITY, e)
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl Repository<User> for SeaOrmUserRepository {
    async fn create(&self, item: User) -> DomainResult<User> {
        let new_user = user::ActiveModel {
            id: NotSet,
            username: Set(item.username),
            email: Set(item.email),
            full_name: Set(item.full_name),
            password_hash: Set(item.password_hash),
            role: Set(domain_role_to_entity(item.role)),
            is_active: Set(item.is_active),
            created_at: Set(item.created_at),
            last_login_at: Set(item.last_login_at),
        };

        let model = new_user.insert(&self.db).await.map_err(err)?;
        Ok(user_model_to_domain(model))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn update(&self, item: User) -> DomainResult<User> {
        let id = item.id;
        let active = user::ActiveModel {
            id: Set(item.id),
            username: Set(item.username),
            email: Set(item.email),
            full_name: Set(item.full_name),
            password_hash: Set(item.password_hash),
            role: Set(domain_role_to_entity(item.role)),
            is_active: Set(item.is_active),
            created_at: Set(item.created_at),
            last_login_at: Set(item.last_login_at),
        };

        let updated = active.update(&self.db).await.map_err(|e| match err(e) {
            DomainError::NotFound { .. } => DomainError::not_found(User::ENTITY, id),
            other => other,
        })?;

        Ok(user_model_to_domain(updated))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(User::ENTITY, id));
        }

        Ok(())
    }

    async fn list(&self, offset: u64, limit: u64) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .offset(offset)
            .limit(page_limit(limit))
            .all(&self.db)
            .await
            .map_err(err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(err)
    }
}

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> DomainResult<()> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::LastLoginAt, Expr::value(at))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(User::ENTITY, id));
        }

        Ok(())
    }
}
