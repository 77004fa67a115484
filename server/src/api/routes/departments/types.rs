//! Department API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::constants::MAX_DEPARTMENT_NAME_LENGTH;
use crate::data::types::{DepartmentRow, DepartmentUpdate, NewDepartment};

/// Department DTO for API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepartmentDto {
    pub id: i64,
    pub name: String,
    pub department_type: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DepartmentRow> for DepartmentDto {
    fn from(row: DepartmentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            department_type: row.department_type,
            is_deleted: row.is_deleted,
            created_at: DateTime::from_timestamp(row.created_at, 0).unwrap_or_else(Utc::now),
            updated_at: DateTime::from_timestamp(row.updated_at, 0).unwrap_or_else(Utc::now),
        }
    }
}

/// Request body for creating or replacing a department
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DepartmentRequest {
    #[validate(length(
        min = 1,
        max = MAX_DEPARTMENT_NAME_LENGTH,
        message = "Name must be 1-100 characters"
    ))]
    pub name: String,

    /// One of DEV, TEST, SCRUM_MASTER, PM (case-insensitive)
    pub department_type: String,
}

impl From<DepartmentRequest> for NewDepartment {
    fn from(body: DepartmentRequest) -> Self {
        Self {
            name: body.name,
            department_type: body.department_type,
        }
    }
}

impl From<DepartmentRequest> for DepartmentUpdate {
    fn from(body: DepartmentRequest) -> Self {
        Self {
            name: body.name,
            department_type: body.department_type,
        }
    }
}
