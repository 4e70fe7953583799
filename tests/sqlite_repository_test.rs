//! SeaORM repositories against a migrated in-memory SQLite database.

use chrono::{NaiveDate, Utc};
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;

use staff_api::domain::{Cpf, Department, DomainError, Email, Employee, User, UserRole};
use staff_api::infrastructure::database::migrator::Migrator;
use staff_api::infrastructure::crypto::password::hash_password;
use staff_api::RepositoryProvider;

// =============================================================================
// Helpers
// =============================================================================

async fn repos() -> RepositoryProvider {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    RepositoryProvider::sea_orm(db)
}

fn user(username: &str, email: &str) -> User {
    User {
        id: 0,
        username: username.into(),
        email: email.into(),
        full_name: "Test Account".into(),
        password_hash: hash_password("Senha@123"),
        role: UserRole::Manager,
        is_active: true,
        created_at: Utc::now(),
        last_login_at: None,
    }
}

fn department(name: &str) -> Department {
    Department {
        id: 0,
        name: name.into(),
        description: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn employee(cpf: &str, email: &str, department_id: i64) -> Employee {
    Employee {
        id: 0,
        full_name: "Ana Souza".into(),
        cpf: Cpf::new(cpf).unwrap(),
        email: Email::new(email).unwrap(),
        phone: Some("+55 11 99999-0000".into()),
        position: "Developer".into(),
        salary_cents: 850_050,
        hire_date: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
        department_id,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_user_round_trip_and_lookups() {
    let repos = repos().await;
    let created = repos.users.create(user("joao", "joao@x.com")).await.unwrap();
    assert!(created.id > 0);

    let by_name = repos.users.find_by_username("joao").await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);
    assert_eq!(by_name.role, UserRole::Manager);
    assert_eq!(by_name.password_hash, created.password_hash);

    let by_email = repos.users.find_by_email("joao@x.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);
    assert!(repos.users.find_by_username("maria").await.unwrap().is_none());
}

#[tokio::test]
async fn test_user_unique_columns_map_to_duplicate() {
    let repos = repos().await;
    repos.users.create(user("joao", "joao@x.com")).await.unwrap();

    let same_username = repos.users.create(user("joao", "other@x.com")).await.unwrap_err();
    assert!(matches!(same_username, DomainError::Duplicate(_)));

    let same_email = repos.users.create(user("maria", "joao@x.com")).await.unwrap_err();
    assert!(matches!(same_email, DomainError::Duplicate(_)));

    assert_eq!(repos.users.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_record_login_persists() {
    let repos = repos().await;
    let created = repos.users.create(user("joao", "joao@x.com")).await.unwrap();
    assert!(created.last_login_at.is_none());

    let at = Utc::now();
    repos.users.record_login(created.id, at).await.unwrap();
    let stored = repos.users.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(
        stored.last_login_at.map(|t| t.timestamp_millis()),
        Some(at.timestamp_millis())
    );

    let missing = repos.users.record_login(9_999, at).await.unwrap_err();
    assert!(matches!(missing, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_user_update_and_delete() {
    let repos = repos().await;
    let created = repos.users.create(user("joao", "joao@x.com")).await.unwrap();

    let updated = repos
        .users
        .update(User {
            role: UserRole::Viewer,
            is_active: false,
            ..created.clone()
        })
        .await
        .unwrap();
    assert_eq!(updated.role, UserRole::Viewer);
    assert!(!updated.is_active);

    repos.users.delete(created.id).await.unwrap();
    assert!(matches!(
        repos.users.delete(created.id).await.unwrap_err(),
        DomainError::NotFound { .. }
    ));
}

// =============================================================================
// Departments and employees
// =============================================================================

#[tokio::test]
async fn test_department_name_is_unique() {
    let repos = repos().await;
    repos.departments.create(department("Engineering")).await.unwrap();

    let err = repos.departments.create(department("Engineering")).await.unwrap_err();
    assert!(matches!(err, DomainError::Duplicate(_)));

    let found = repos.departments.find_by_name("Engineering").await.unwrap();
    assert!(found.is_some());
    assert!(repos.departments.find_by_name("Finance").await.unwrap().is_none());
}

#[tokio::test]
async fn test_paging_and_unbounded_limit() {
    let repos = repos().await;
    for name in ["Engineering", "Finance", "Legal", "Sales", "Support"] {
        repos.departments.create(department(name)).await.unwrap();
    }

    let page: Vec<String> = repos
        .departments
        .list(2, 2)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(page, ["Legal", "Sales"]);

    assert_eq!(repos.departments.list(0, u64::MAX).await.unwrap().len(), 5);
    assert!(repos
        .departments
        .list(i64::MAX as u64, 100)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_employee_lookups_and_department_listing() {
    let repos = repos().await;
    let engineering = repos.departments.create(department("Engineering")).await.unwrap();
    let finance = repos.departments.create(department("Finance")).await.unwrap();

    let ana = repos
        .employees
        .create(employee("529.982.247-25", "ana@empresa.com", engineering.id))
        .await
        .unwrap();
    repos
        .employees
        .create(employee("123.456.789-09", "bruno@empresa.com", engineering.id))
        .await
        .unwrap();
    repos
        .employees
        .create(employee("111.444.777-35", "carla@empresa.com", finance.id))
        .await
        .unwrap();

    let by_cpf = repos
        .employees
        .find_by_cpf(&Cpf::new("52998224725").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_cpf.id, ana.id);
    assert_eq!(by_cpf.salary_cents, 850_050);
    assert_eq!(by_cpf.phone.as_deref(), Some("+55 11 99999-0000"));

    let by_email = repos
        .employees
        .find_by_email(&Email::new("bruno@empresa.com").unwrap())
        .await
        .unwrap();
    assert!(by_email.is_some());

    assert_eq!(repos.employees.count_by_department(engineering.id).await.unwrap(), 2);
    let second = repos
        .employees
        .list_by_department(engineering.id, 1, 10)
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].email.as_str(), "bruno@empresa.com");
}

#[tokio::test]
async fn test_employee_unique_cpf_and_email() {
    let repos = repos().await;
    let dept = repos.departments.create(department("Engineering")).await.unwrap();
    repos
        .employees
        .create(employee("529.982.247-25", "ana@empresa.com", dept.id))
        .await
        .unwrap();

    let same_cpf = repos
        .employees
        .create(employee("529.982.247-25", "other@empresa.com", dept.id))
        .await
        .unwrap_err();
    assert!(matches!(same_cpf, DomainError::Duplicate(_)));

    let same_email = repos
        .employees
        .create(employee("123.456.789-09", "ana@empresa.com", dept.id))
        .await
        .unwrap_err();
    assert!(matches!(same_email, DomainError::Duplicate(_)));
}

#[tokio::test]
async fn test_foreign_key_violations_map_to_validation() {
    let repos = repos().await;
    let dept = repos.departments.create(department("Engineering")).await.unwrap();

    let orphan = repos
        .employees
        .create(employee("529.982.247-25", "ana@empresa.com", dept.id + 100))
        .await
        .unwrap_err();
    assert!(matches!(orphan, DomainError::Validation(_)));

    repos
        .employees
        .create(employee("529.982.247-25", "ana@empresa.com", dept.id))
        .await
        .unwrap();
    let staffed = repos.departments.delete(dept.id).await.unwrap_err();
    assert!(matches!(staffed, DomainError::Validation(_)));
    assert!(repos.departments.find_by_id(dept.id).await.unwrap().is_some());
}
