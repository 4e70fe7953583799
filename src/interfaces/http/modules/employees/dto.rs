//! Employee DTOs
//!
//! Salaries travel as decimal currency units (`4500.50`) and are stored as
//! integer cents.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::{EmployeeChanges, NewEmployee};
use crate::domain::Employee;
use crate::interfaces::http::common::double_option;

fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub id: i64,
    pub full_name: String,
    /// `XXX.XXX.XXX-XX`
    pub cpf: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub salary: f64,
    pub hire_date: NaiveDate,
    pub department_id: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            full_name: e.full_name,
            cpf: e.cpf.formatted(),
            email: e.email.into_inner(),
            phone: e.phone,
            position: e.position,
            salary: e.salary_cents as f64 / 100.0,
            hire_date: e.hire_date,
            department_id: e.department_id,
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 2, max = 150, message = "full_name must be 2–150 characters"))]
    pub full_name: String,
    #[validate(length(min = 11, max = 14, message = "cpf must have 11 digits"))]
    pub cpf: String,
    #[validate(length(min = 1, max = 150, message = "email must be 1–150 characters"))]
    pub email: String,
    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,
    #[validate(length(min = 2, max = 100, message = "position must be 2–100 characters"))]
    pub position: String,
    #[validate(range(min = 0.0, max = 1_000_000_000.0, message = "salary must not be negative"))]
    pub salary: f64,
    pub hire_date: NaiveDate,
    pub department_id: i64,
}

impl From<CreateEmployeeRequest> for NewEmployee {
    fn from(r: CreateEmployeeRequest) -> Self {
        Self {
            full_name: r.full_name,
            cpf: r.cpf,
            email: r.email,
            phone: r.phone,
            position: r.position,
            salary_cents: to_cents(r.salary),
            hire_date: r.hire_date,
            department_id: r.department_id,
        }
    }
}

/// Full replacement (`PUT`); an omitted phone is cleared.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 2, max = 150, message = "full_name must be 2–150 characters"))]
    pub full_name: String,
    #[validate(length(min = 11, max = 14, message = "cpf must have 11 digits"))]
    pub cpf: String,
    #[validate(length(min = 1, max = 150, message = "email must be 1–150 characters"))]
    pub email: String,
    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,
    #[validate(length(min = 2, max = 100, message = "position must be 2–100 characters"))]
    pub position: String,
    #[validate(range(min = 0.0, max = 1_000_000_000.0, message = "salary must not be negative"))]
    pub salary: f64,
    pub hire_date: NaiveDate,
    pub department_id: i64,
    pub is_active: Option<bool>,
}

impl From<UpdateEmployeeRequest> for EmployeeChanges {
    fn from(r: UpdateEmployeeRequest) -> Self {
        Self {
            full_name: Some(r.full_name),
            cpf: Some(r.cpf),
            email: Some(r.email),
            phone: Some(r.phone),
            position: Some(r.position),
            salary_cents: Some(to_cents(r.salary)),
            hire_date: Some(r.hire_date),
            department_id: Some(r.department_id),
            is_active: r.is_active,
        }
    }
}

/// Partial update (`PATCH`); only present fields change.
#[derive(Debug, Deserialize, Validate)]
pub struct PatchEmployeeRequest {
    #[validate(length(min = 2, max = 150, message = "full_name must be 2–150 characters"))]
    pub full_name: Option<String>,
    #[validate(length(min = 11, max = 14, message = "cpf must have 11 digits"))]
    pub cpf: Option<String>,
    #[validate(length(min = 1, max = 150, message = "email must be 1–150 characters"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<Option<String>>,
    #[validate(length(min = 2, max = 100, message = "position must be 2–100 characters"))]
    pub position: Option<String>,
    #[validate(range(min = 0.0, max = 1_000_000_000.0, message = "salary must not be negative"))]
    pub salary: Option<f64>,
    pub hire_date: Option<NaiveDate>,
    pub department_id: Option<i64>,
    pub is_active: Option<bool>,
}

impl From<PatchEmployeeRequest> for EmployeeChanges {
    fn from(r: PatchEmployeeRequest) -> Self {
        Self {
            full_name: r.full_name,
            cpf: r.cpf,
            email: r.email,
            phone: r.phone,
            position: r.position,
            salary_cents: r.salary.map(to_cents),
            hire_date: r.hire_date,
            department_id: r.department_id,
            is_active: r.is_active,
        }
    }
}
