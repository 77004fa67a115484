//! Row and input types for accounts and departments
//!
//! Rows map 1:1 onto table columns (see the entity field tables in
//! `data::filters`), so the generic query executor can decode them with
//! `sqlx::FromRow`.

use serde::{Deserialize, Serialize};

// ============================================================================
// Department types
// ============================================================================

/// Department row from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DepartmentRow {
    pub id: i64,
    pub name: String,
    pub department_type: String,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Values for a new department
#[derive(Debug, Clone)]
pub struct NewDepartment {
    pub name: String,
    pub department_type: String,
}

/// Replacement values for an existing department
#[derive(Debug, Clone)]
pub struct DepartmentUpdate {
    pub name: String,
    pub department_type: String,
}

// ============================================================================
// Account types
// ============================================================================

/// Account row from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub department_id: Option<i64>,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Values for a new account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub department_id: i64,
}

/// Replacement values for an existing account
///
/// `department_id = None` detaches the account from its department.
#[derive(Debug, Clone)]
pub struct AccountUpdate {
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub department_id: Option<i64>,
}
