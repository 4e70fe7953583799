//! Department domain entity

use chrono::{DateTime, Utc};

use crate::domain::Identifiable;

#[derive(Debug, Clone)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for Department {
    const ENTITY: &'static str = "Department";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
