//! Filter validation errors

use thiserror::Error;

/// Rejection raised before any predicate is composed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Filter field is required")]
    MissingField,

    #[error("Filter operator is required")]
    MissingOperator,

    #[error("Filter value is required")]
    MissingValue,

    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),

    #[error("Cannot filter {entity} by field: {field}")]
    UnknownField { entity: &'static str, field: String },

    #[error("Operator {operator} is not supported for {kind} field {field}")]
    UnsupportedOperator {
        field: &'static str,
        kind: &'static str,
        operator: &'static str,
    },

    #[error("Invalid value '{value}' for {kind} field {field}")]
    InvalidValue {
        field: &'static str,
        kind: &'static str,
        value: String,
    },

    #[error("Cannot sort {entity} by field: {field}")]
    InvalidSort { entity: &'static str, field: String },

    #[error("Invalid {param} parameter: {message}")]
    InvalidPage {
        param: &'static str,
        message: String,
    },
}

impl FilterError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField => "MISSING_FILTER_FIELD",
            Self::MissingOperator => "MISSING_FILTER_OPERATOR",
            Self::MissingValue => "MISSING_FILTER_VALUE",
            Self::UnknownOperator(_) => "INVALID_FILTER_OPERATOR",
            Self::UnknownField { .. } => "INVALID_FILTER_FIELD",
            Self::UnsupportedOperator { .. } => "UNSUPPORTED_FILTER_OPERATOR",
            Self::InvalidValue { .. } => "INVALID_FILTER_VALUE",
            Self::InvalidSort { .. } => "INVALID_SORT",
            Self::InvalidPage { .. } => "INVALID_PAGINATION",
        }
    }
}
