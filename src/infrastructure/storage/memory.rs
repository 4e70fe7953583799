//! In-memory storage implementation

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::{
    Cpf, Department, DepartmentRepositoryInterface, DomainError, DomainResult, Email, Employee,
    EmployeeRepositoryInterface, Identifiable, Repository, User, UserRepositoryInterface,
};

/// Columns that must be unique across all rows of an entity.
pub trait UniqueKeys {
    fn unique_keys(&self) -> Vec<(&'static str, String)>;
}

impl UniqueKeys for User {
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("email", self.email.clone()),
        ]
    }
}

impl UniqueKeys for Department {
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone())]
    }
}

impl UniqueKeys for Employee {
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![
            ("cpf", self.cpf.digits().to_string()),
            ("email", self.email.as_str().to_string()),
        ]
    }
}

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

/// In-memory repository for development and testing.
///
/// A single write lock covers the uniqueness check and the insert, giving the
/// same guarantee a unique index gives the database.
pub struct InMemoryRepository<T> {
    table: RwLock<Table<T>>,
}

impl<T> InMemoryRepository<T>
where
    T: Identifiable + UniqueKeys + Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn check_unique(rows: &BTreeMap<i64, T>, item: &T, skip_id: Option<i64>) -> DomainResult<()> {
        let keys = item.unique_keys();
        for other in rows.values() {
            if Some(other.id()) == skip_id {
                continue;
            }
            for ((field, value), (_, other_value)) in keys.iter().zip(other.unique_keys()) {
                if *value == other_value {
                    return Err(DomainError::Duplicate(format!(
                        "{} with this {} already exists",
                        T::ENTITY,
                        field
                    )));
                }
            }
        }
        Ok(())
    }

    async fn find_first(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        let table = self.table.read().await;
        table.rows.values().find(|row| pred(row)).cloned()
    }

    async fn filter_page(&self, pred: impl Fn(&T) -> bool, offset: u64, limit: u64) -> Vec<T> {
        let table = self.table.read().await;
        table
            .rows
            .values()
            .filter(|row| pred(row))
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

impl<T> Default for InMemoryRepository<T>
where
    T: Identifiable + UniqueKeys + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Identifiable + UniqueKeys + Clone + Send + Sync + 'static,
{
    async fn create(&self, mut item: T) -> DomainResult<T> {
        let mut table = self.table.write().await;
        Self::check_unique(&table.rows, &item, None)?;

        let id = table.next_id;
        table.next_id += 1;
        item.set_id(id);
        table.rows.insert(id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<T>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, item: T) -> DomainResult<T> {
        let mut table = self.table.write().await;
        let id = item.id();
        if !table.rows.contains_key(&id) {
            return Err(DomainError::not_found(T::ENTITY, id));
        }
        Self::check_unique(&table.rows, &item, Some(id))?;
        table.rows.insert(id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(T::ENTITY, id))
    }

    async fn list(&self, offset: u64, limit: u64) -> DomainResult<Vec<T>> {
        Ok(self.filter_page(|_| true, offset, limit).await)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.table.read().await.rows.len() as u64)
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryRepository<User> {
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self.find_first(|u| u.username == username).await)
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self.find_first(|u| u.email == email).await)
    }

    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> DomainResult<()> {
        let mut table = self.table.write().await;
        let user = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(User::ENTITY, id))?;
        user.last_login_at = Some(at);
        Ok(())
    }
}

#[async_trait]
impl DepartmentRepositoryInterface for InMemoryRepository<Department> {
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Department>> {
        Ok(self.find_first(|d| d.name == name).await)
    }
}

#[async_trait]
impl EmployeeRepositoryInterface for InMemoryRepository<Employee> {
    async fn find_by_cpf(&self, cpf: &Cpf) -> DomainResult<Option<Employee>> {
        Ok(self.find_first(|e| &e.cpf == cpf).await)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Employee>> {
        Ok(self.find_first(|e| &e.email == email).await)
    }

    async fn list_by_department(
        &self,
        department_id: i64,
        offset: u64,
        limit: u64,
    ) -> DomainResult<Vec<Employee>> {
        Ok(self
            .filter_page(|e| e.department_id == department_id, offset, limit)
            .await)
    }

    async fn count_by_department(&self, department_id: i64) -> DomainResult<u64> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|e| e.department_id == department_id)
            .count() as u64)
    }
}
