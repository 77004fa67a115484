//! Service-level errors

use thiserror::Error;

use crate::data::DataError;
use crate::data::filters::FilterError;

/// Stable business-rule rejection codes
pub mod codes {
    pub const ACCOUNT_USERNAME_EXISTS: &str = "account.username.isExisted";
    pub const ACCOUNT_ROLE_INVALID: &str = "account.role.isNotValid";
    pub const ACCOUNT_DEPARTMENT_NULL: &str = "account.departmentId.isNull";
    pub const ACCOUNT_DEPARTMENT_MISSING: &str = "account.departmentId.isNotExisted";
    pub const DEPARTMENT_NAME_EXISTS: &str = "department.name.isExisted";
    pub const DEPARTMENT_TYPE_INVALID: &str = "department.type.isNotValid";
}

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Malformed criteria or expression, raised before any query runs
    #[error(transparent)]
    Validation(#[from] FilterError),

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Business rule violation
    #[error("Rejected ({code}): {param}")]
    Rejected { code: &'static str, param: String },

    #[error(transparent)]
    Data(#[from] DataError),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn rejected(code: &'static str, param: impl ToString) -> Self {
        Self::Rejected {
            code,
            param: param.to_string(),
        }
    }
}
