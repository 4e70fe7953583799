//! Department DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::{DepartmentChanges, NewDepartment};
use crate::domain::Department;
use crate::interfaces::http::common::double_option;

#[derive(Debug, Serialize)]
pub struct DepartmentResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Department> for DepartmentResponse {
    fn from(d: Department) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            is_active: d.is_active,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 2, max = 100, message = "name must be 2–100 characters"))]
    pub name: String,
    #[validate(length(max = 255, message = "description must be at most 255 characters"))]
    pub description: Option<String>,
}

impl From<CreateDepartmentRequest> for NewDepartment {
    fn from(r: CreateDepartmentRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
        }
    }
}

/// Full replacement (`PUT`); an omitted description is cleared.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDepartmentRequest {
    #[validate(length(min = 2, max = 100, message = "name must be 2–100 characters"))]
    pub name: String,
    #[validate(length(max = 255, message = "description must be at most 255 characters"))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateDepartmentRequest> for DepartmentChanges {
    fn from(r: UpdateDepartmentRequest) -> Self {
        Self {
            name: Some(r.name),
            description: Some(r.description),
            is_active: r.is_active,
        }
    }
}

/// Partial update (`PATCH`); only present fields change.
#[derive(Debug, Deserialize, Validate)]
pub struct PatchDepartmentRequest {
    #[validate(length(min = 2, max = 100, message = "name must be 2–100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 255, message = "description must be at most 255 characters"))]
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl From<PatchDepartmentRequest> for DepartmentChanges {
    fn from(r: PatchDepartmentRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            is_active: r.is_active,
        }
    }
}
