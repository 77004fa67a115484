//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::accounts::types::{AccountDto, CreateAccountRequest, UpdateAccountRequest};
use crate::api::routes::departments::types::{DepartmentDto, DepartmentRequest};
use crate::api::routes::health::HealthResponse;
use crate::api::routes::{accounts, departments, health};
use crate::api::types::PaginationMeta;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Account and department directory with dynamic filtering"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "accounts", description = "Account management and filtering"),
        (name = "departments", description = "Department management and filtering")
    ),
    paths(
        health::health,
        // Accounts
        accounts::list_accounts,
        accounts::filter_accounts,
        accounts::get_account,
        accounts::get_account_by_username,
        accounts::create_account,
        accounts::update_account,
        accounts::delete_account,
        // Departments
        departments::list_departments,
        departments::filter_departments,
        departments::get_department,
        departments::create_department,
        departments::update_department,
        departments::delete_department,
    ),
    components(schemas(
        HealthResponse,
        PaginationMeta,
        AccountDto,
        CreateAccountRequest,
        UpdateAccountRequest,
        DepartmentDto,
        DepartmentRequest,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Roster API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout",
                deepLinking: true,
                showExtensions: true,
                showCommonExtensions: true
            });
        };
    </script>
</body>
</html>"#;
