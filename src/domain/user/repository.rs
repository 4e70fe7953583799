use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::User;
use crate::domain::{DomainResult, Repository};

#[async_trait]
pub trait UserRepositoryInterface: Repository<User> {
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Stamp `last_login_at` without touching any other column.
    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> DomainResult<()>;
}
