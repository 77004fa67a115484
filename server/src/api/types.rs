//! Shared API types
//!
//! Error responses and the pagination envelope used by every listing endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::data::DataError;
use crate::data::filters::{Expression, Page};
use crate::domain::ServiceError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn from_data(e: DataError) -> Self {
        tracing::error!(error = %e, backend = e.backend(), "Data error");
        Self::internal("Database operation failed")
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(e) => Self::bad_request(e.code(), e.to_string()),
            ServiceError::NotFound { entity, key } => Self::not_found(
                format!("{}_NOT_FOUND", entity.to_ascii_uppercase()),
                format!("No {} found for {}", entity, key),
            ),
            ServiceError::Rejected { code, param } => {
                Self::bad_request(code, format!("Rejected value: {}", param))
            }
            ServiceError::Data(DataError::Conflict(message)) => Self::conflict("CONFLICT", message),
            ServiceError::Data(e) => Self::from_data(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Conflict { code, message } => (StatusCode::CONFLICT, "conflict", code, message),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

/// Pagination metadata in response
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Zero-based page index, as requested
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Generic paginated response wrapper
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// Convert a page of rows into DTOs
    pub fn from_page<R>(page: Page<R>) -> Self
    where
        T: From<R>,
    {
        let meta = PaginationMeta {
            page: page.page,
            size: page.size,
            total_items: page.total_elements,
            total_pages: page.total_pages(),
        };
        Self {
            data: page.content.into_iter().map(T::from).collect(),
            meta,
        }
    }
}

/// `field`/`operator`/`value` triple for the `/filter` endpoints
///
/// Missing parts are reported by the expression validator, not here.
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExpressionQuery {
    /// Field name, e.g. `username`
    #[validate(length(max = 64, message = "Field must be at most 64 characters"))]
    pub field: Option<String>,

    /// Operator, e.g. `contains`
    #[validate(length(max = 32, message = "Operator must be at most 32 characters"))]
    pub operator: Option<String>,

    /// Raw value; comma-separated for `in` / `notIn`
    #[validate(length(max = 1024, message = "Value must be at most 1024 characters"))]
    pub value: Option<String>,
}

impl From<ExpressionQuery> for Expression {
    fn from(query: ExpressionQuery) -> Self {
        Self {
            field: query.field,
            operator: query.operator,
            value: query.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::FilterError;
    use crate::domain::codes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_maps_to_400_with_filter_code() {
        let err: ApiError = ServiceError::from(FilterError::MissingValue).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "bad_request");
        assert_eq!(body["code"], "MISSING_FILTER_VALUE");
    }

    #[tokio::test]
    async fn test_rejection_keeps_business_code() {
        let err: ApiError = ServiceError::rejected(codes::ACCOUNT_ROLE_INVALID, "OWNER").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "account.role.isNotValid");
    }

    #[tokio::test]
    async fn test_not_found_and_conflict_statuses() {
        let err: ApiError = ServiceError::not_found("account", 9).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "ACCOUNT_NOT_FOUND");

        let err: ApiError =
            ServiceError::Data(DataError::Conflict("username 'ann' already exists".into())).into();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_data_errors_hide_details() {
        let err: ApiError = ServiceError::Data(DataError::Sqlite(sqlx::Error::PoolClosed)).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "Database operation failed");
    }

    #[test]
    fn test_paginated_response_from_page() {
        let page = Page {
            content: vec![1_i64, 2],
            total_elements: 5,
            page: 1,
            size: 2,
        };
        let response = PaginatedResponse::<i64>::from_page(page);
        assert_eq!(response.data, vec![1, 2]);
        assert_eq!(response.meta.total_items, 5);
        assert_eq!(response.meta.total_pages, 3);
        assert_eq!(response.meta.size, 2);
    }
}
