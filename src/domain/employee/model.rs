//! Employee domain entity

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::value_objects::{Cpf, Email};
use crate::domain::Identifiable;

#[derive(Debug, Clone)]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub cpf: Cpf,
    pub email: Email,
    pub phone: Option<String>,
    pub position: String,
    /// Monthly salary in cents
    pub salary_cents: i64,
    pub hire_date: NaiveDate,
    pub department_id: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for Employee {
    const ENTITY: &'static str = "Employee";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
