//! Generic persistence contract shared by every aggregate

use async_trait::async_trait;

use super::DomainResult;

/// Entities stored under a numeric primary key.
pub trait Identifiable {
    /// Name used in `NotFound` errors and logs.
    const ENTITY: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

/// By-id CRUD plus offset/limit pagination.
///
/// `create` ignores the id on the incoming value and returns the stored copy
/// with its assigned id. Unique-constraint violations surface as
/// `DomainError::Duplicate`; `update`/`delete` of a missing id as
/// `DomainError::NotFound`.
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Identifiable + Send + Sync + 'static,
{
    async fn create(&self, item: T) -> DomainResult<T>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<T>>;
    async fn update(&self, item: T) -> DomainResult<T>;
    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// Items ordered by id ascending.
    async fn list(&self, offset: u64, limit: u64) -> DomainResult<Vec<T>>;
    async fn count(&self) -> DomainResult<u64>;

    async fn list_all(&self) -> DomainResult<Vec<T>> {
        self.list(0, u64::MAX).await
    }
}
