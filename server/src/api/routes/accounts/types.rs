//! Account API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::constants::{MAX_PERSON_NAME_LENGTH, MAX_USERNAME_LENGTH};
use crate::data::types::{AccountRow, AccountUpdate};
use crate::domain::CreateAccount;

/// Account DTO for API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountDto {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub department_id: Option<i64>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AccountRow> for AccountDto {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            role: row.role,
            department_id: row.department_id,
            is_deleted: row.is_deleted,
            created_at: DateTime::from_timestamp(row.created_at, 0).unwrap_or_else(Utc::now),
            updated_at: DateTime::from_timestamp(row.updated_at, 0).unwrap_or_else(Utc::now),
        }
    }
}

/// Request body for creating an account
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[validate(length(
        min = 1,
        max = MAX_USERNAME_LENGTH,
        message = "Username must be 1-50 characters"
    ))]
    pub username: String,

    #[validate(length(
        min = 1,
        max = MAX_PERSON_NAME_LENGTH,
        message = "First name must be 1-50 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = MAX_PERSON_NAME_LENGTH,
        message = "Last name must be 1-50 characters"
    ))]
    pub last_name: String,

    /// One of ADMIN, EMPLOYEE, MANAGER (case-insensitive)
    pub role: String,

    /// Required; `null` is rejected with `account.departmentId.isNull`
    pub department_id: Option<i64>,
}

impl From<CreateAccountRequest> for CreateAccount {
    fn from(body: CreateAccountRequest) -> Self {
        Self {
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
            role: body.role,
            department_id: body.department_id,
        }
    }
}

/// Request body for replacing an account's mutable fields
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAccountRequest {
    #[validate(length(
        min = 1,
        max = MAX_PERSON_NAME_LENGTH,
        message = "First name must be 1-50 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = MAX_PERSON_NAME_LENGTH,
        message = "Last name must be 1-50 characters"
    ))]
    pub last_name: String,

    pub role: String,

    /// `null` or absent detaches the account from its department
    #[serde(default)]
    pub department_id: Option<i64>,
}

impl From<UpdateAccountRequest> for AccountUpdate {
    fn from(body: UpdateAccountRequest) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            role: body.role,
            department_id: body.department_id,
        }
    }
}
