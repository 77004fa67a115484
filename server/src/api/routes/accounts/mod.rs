//! Account API endpoints

pub mod types;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{FilterParams, IdPath, ValidatedJson, ValidatedQuery};
use crate::api::types::{ApiError, ExpressionQuery, PaginatedResponse};
use crate::domain::AccountService;

use types::{AccountDto, CreateAccountRequest, UpdateAccountRequest};

/// Shared state for Accounts API endpoints
#[derive(Clone)]
pub struct AccountsApiState {
    pub service: AccountService,
}

/// Build Accounts API routes
pub fn routes(service: AccountService) -> Router<()> {
    let state = AccountsApiState { service };

    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route("/filter", get(filter_accounts))
        .route("/username/{username}", get(get_account_by_username))
        .route(
            "/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
        .with_state(state)
}

/// List accounts matching per-field criteria
///
/// Filters use `<field>.<operator>=<value>` keys, e.g. `username.contains=an`
/// or `role.in=ADMIN,MANAGER`. `search` matches any text field (and the ID
/// when numeric).
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    tag = "accounts",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page index"),
        ("size" = Option<u32>, Query, description = "Items per page"),
        ("sort" = Option<String>, Query, description = "Sort key, e.g. `username,desc` (repeatable)"),
        ("search" = Option<String>, Query, description = "Free-text search across text fields")
    ),
    responses(
        (status = 200, description = "Page of accounts with pagination metadata"),
        (status = 400, description = "Malformed filter, sort or page parameter")
    )
)]
pub async fn list_accounts(
    State(state): State<AccountsApiState>,
    params: FilterParams,
) -> Result<Json<PaginatedResponse<AccountDto>>, ApiError> {
    let page = state.service.list(&params).await?;
    Ok(Json(PaginatedResponse::from_page(page)))
}

/// List every account matching a single expression
#[utoipa::path(
    get,
    path = "/api/v1/accounts/filter",
    tag = "accounts",
    params(ExpressionQuery),
    responses(
        (status = 200, description = "Matching accounts ordered by ID", body = Vec<AccountDto>),
        (status = 400, description = "Invalid expression")
    )
)]
pub async fn filter_accounts(
    State(state): State<AccountsApiState>,
    ValidatedQuery(query): ValidatedQuery<ExpressionQuery>,
) -> Result<Json<Vec<AccountDto>>, ApiError> {
    let accounts = state.service.find_by_expression(&query.into()).await?;
    Ok(Json(accounts.into_iter().map(AccountDto::from).collect()))
}

/// Get an account by ID
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    tag = "accounts",
    params(("id" = i64, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account", body = AccountDto),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_account(
    State(state): State<AccountsApiState>,
    IdPath(id): IdPath,
) -> Result<Json<AccountDto>, ApiError> {
    Ok(Json(state.service.get(id).await?.into()))
}

/// Get an account by username
#[utoipa::path(
    get,
    path = "/api/v1/accounts/username/{username}",
    tag = "accounts",
    params(("username" = String, Path, description = "Exact username")),
    responses(
        (status = 200, description = "Account", body = AccountDto),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_account_by_username(
    State(state): State<AccountsApiState>,
    Path(username): Path<String>,
) -> Result<Json<AccountDto>, ApiError> {
    Ok(Json(state.service.get_by_username(&username).await?.into()))
}

/// Create an account
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    tag = "accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AccountDto),
        (status = 400, description = "Invalid request or business rule violated"),
        (status = 409, description = "Username taken concurrently")
    )
)]
pub async fn create_account(
    State(state): State<AccountsApiState>,
    ValidatedJson(body): ValidatedJson<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountDto>), ApiError> {
    let account = state.service.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Replace an account's names, role and department
#[utoipa::path(
    put,
    path = "/api/v1/accounts/{id}",
    tag = "accounts",
    params(("id" = i64, Path, description = "Account ID")),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated", body = AccountDto),
        (status = 400, description = "Invalid request or business rule violated"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn update_account(
    State(state): State<AccountsApiState>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<UpdateAccountRequest>,
) -> Result<Json<AccountDto>, ApiError> {
    Ok(Json(state.service.update(id, body.into()).await?.into()))
}

/// Soft-delete an account
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{id}",
    tag = "accounts",
    params(("id" = i64, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account flagged as deleted", body = AccountDto),
        (status = 404, description = "Account not found")
    )
)]
pub async fn delete_account(
    State(state): State<AccountsApiState>,
    IdPath(id): IdPath,
) -> Result<Json<AccountDto>, ApiError> {
    Ok(Json(state.service.delete(id).await?.into()))
}
