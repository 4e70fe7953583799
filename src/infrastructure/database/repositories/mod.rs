//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories implementing the generic `Repository<T>`.

pub mod department_repository;
pub mod employee_repository;
pub mod user_repository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

pub use department_repository::SeaOrmDepartmentRepository;
pub use employee_repository::SeaOrmEmployeeRepository;
pub use user_repository::SeaOrmUserRepository;

/// Map a SeaORM error onto the domain taxonomy.
///
/// Unique violations become `Duplicate` so concurrent inserts racing past the
/// service-level existence check still report a conflict.
pub(crate) fn db_err(entity: &'static str, e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Duplicate(format!("{} already exists", entity))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            DomainError::validation(format!("{} references a missing or in-use record", entity))
        }
        _ => match e {
            DbErr::RecordNotUpdated => DomainError::NotFound {
                entity,
                field: "id",
                value: "?".to_string(),
            },
            other => DomainError::Internal(format!("Database error: {}", other)),
        },
    }
}

/// `u64::MAX` means "no limit"; SQLite rejects limits beyond `i64::MAX`.
pub(crate) fn page_limit(limit: u64) -> Option<u64> {
    (limit < i64::MAX as u64).then_some(limit)
}
