//! Department API endpoints

pub mod types;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{FilterParams, IdPath, ValidatedJson, ValidatedQuery};
use crate::api::types::{ApiError, ExpressionQuery, PaginatedResponse};
use crate::domain::DepartmentService;

use types::{DepartmentDto, DepartmentRequest};

/// Shared state for Departments API endpoints
#[derive(Clone)]
pub struct DepartmentsApiState {
    pub service: DepartmentService,
}

/// Build Departments API routes
pub fn routes(service: DepartmentService) -> Router<()> {
    let state = DepartmentsApiState { service };

    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route("/filter", get(filter_departments))
        .route(
            "/{id}",
            get(get_department)
                .put(update_department)
                .delete(delete_department),
        )
        .with_state(state)
}

/// List departments matching per-field criteria
#[utoipa::path(
    get,
    path = "/api/v1/departments",
    tag = "departments",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page index"),
        ("size" = Option<u32>, Query, description = "Items per page"),
        ("sort" = Option<String>, Query, description = "Sort key, e.g. `name,asc` (repeatable)"),
        ("search" = Option<String>, Query, description = "Free-text search across text fields")
    ),
    responses(
        (status = 200, description = "Page of departments with pagination metadata"),
        (status = 400, description = "Malformed filter, sort or page parameter")
    )
)]
pub async fn list_departments(
    State(state): State<DepartmentsApiState>,
    params: FilterParams,
) -> Result<Json<PaginatedResponse<DepartmentDto>>, ApiError> {
    let page = state.service.list(&params).await?;
    Ok(Json(PaginatedResponse::from_page(page)))
}

/// List every department matching a single expression
#[utoipa::path(
    get,
    path = "/api/v1/departments/filter",
    tag = "departments",
    params(ExpressionQuery),
    responses(
        (status = 200, description = "Matching departments ordered by ID", body = Vec<DepartmentDto>),
        (status = 400, description = "Invalid expression")
    )
)]
pub async fn filter_departments(
    State(state): State<DepartmentsApiState>,
    ValidatedQuery(query): ValidatedQuery<ExpressionQuery>,
) -> Result<Json<Vec<DepartmentDto>>, ApiError> {
    let departments = state.service.find_by_expression(&query.into()).await?;
    Ok(Json(
        departments.into_iter().map(DepartmentDto::from).collect(),
    ))
}

/// Get a department by ID
#[utoipa::path(
    get,
    path = "/api/v1/departments/{id}",
    tag = "departments",
    params(("id" = i64, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department", body = DepartmentDto),
        (status = 404, description = "Department not found")
    )
)]
pub async fn get_department(
    State(state): State<DepartmentsApiState>,
    IdPath(id): IdPath,
) -> Result<Json<DepartmentDto>, ApiError> {
    Ok(Json(state.service.get(id).await?.into()))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/api/v1/departments",
    tag = "departments",
    request_body = DepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = DepartmentDto),
        (status = 400, description = "Invalid request or business rule violated"),
        (status = 409, description = "Name taken concurrently")
    )
)]
pub async fn create_department(
    State(state): State<DepartmentsApiState>,
    ValidatedJson(body): ValidatedJson<DepartmentRequest>,
) -> Result<(StatusCode, Json<DepartmentDto>), ApiError> {
    let department = state.service.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(department.into())))
}

/// Rename or retype a department
#[utoipa::path(
    put,
    path = "/api/v1/departments/{id}",
    tag = "departments",
    params(("id" = i64, Path, description = "Department ID")),
    request_body = DepartmentRequest,
    responses(
        (status = 200, description = "Department updated", body = DepartmentDto),
        (status = 400, description = "Invalid request or business rule violated"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn update_department(
    State(state): State<DepartmentsApiState>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<DepartmentRequest>,
) -> Result<Json<DepartmentDto>, ApiError> {
    Ok(Json(state.service.update(id, body.into()).await?.into()))
}

/// Soft-delete a department
#[utoipa::path(
    delete,
    path = "/api/v1/departments/{id}",
    tag = "departments",
    params(("id" = i64, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department flagged as deleted", body = DepartmentDto),
        (status = 404, description = "Department not found")
    )
)]
pub async fn delete_department(
    State(state): State<DepartmentsApiState>,
    IdPath(id): IdPath,
) -> Result<Json<DepartmentDto>, ApiError> {
    Ok(Json(state.service.delete(id).await?.into()))
}
