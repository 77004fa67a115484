//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{accounts, departments, health};
use crate::core::CoreApp;
use crate::core::constants::DEFAULT_BODY_LIMIT;
use crate::data::TransactionalRepository;
use crate::domain::{AccountService, DepartmentService, QueryPolicy};

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let shutdown = app.shutdown.clone();
        let addr = SocketAddr::new(
            app.config
                .server
                .host
                .parse()
                .with_context(|| format!("Invalid server host: {}", app.config.server.host))?,
            app.config.server.port,
        );

        let policy = QueryPolicy::from_config(&app.config.query);
        let router = build_router(
            app.database.repository(),
            policy,
            &allowed_origins,
            app.config.debug,
        );

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Roster listening on http://{}", addr);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}

/// Full application router over a repository
///
/// In debug mode request spans and responses are logged at `info` instead of
/// `debug`.
pub(crate) fn build_router(
    repo: Arc<dyn TransactionalRepository>,
    policy: QueryPolicy,
    allowed_origins: &AllowedOrigins,
    debug: bool,
) -> Router {
    let level = if debug { Level::INFO } else { Level::DEBUG };
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(level))
        .on_response(DefaultOnResponse::new().level(level));

    let account_service = AccountService::new(repo.clone(), policy);
    let department_service = DepartmentService::new(repo, policy);

    Router::new()
        .route("/api/v1/health", get(health::health))
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/docs", get(swagger_ui_html))
        .route("/api/docs/", get(swagger_ui_html))
        .nest("/api/v1/accounts", accounts::routes(account_service))
        .nest("/api/v1/departments", departments::routes(department_service))
        .fallback(middleware::handle_404)
        .layer(
            ServiceBuilder::new()
                .layer(trace)
                .layer(CompressionLayer::new())
                .layer(middleware::cors(allowed_origins))
                .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT)),
        )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::core::config::QueryConfig;
    use crate::data::sqlite::test_pool_with_schema;
    use crate::data::{SqliteService, TransactionalService};

    async fn router() -> Router {
        let pool = test_pool_with_schema().await;
        let repo =
            TransactionalService::Sqlite(Arc::new(SqliteService::from_pool(pool))).repository();
        build_router(
            repo,
            QueryPolicy::from_config(&QueryConfig::default()),
            &AllowedOrigins::new("127.0.0.1", 8080),
            false,
        )
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = router()
            .await
            .oneshot(get_request("/api/v1/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = router()
            .await
            .oneshot(get_request("/api/v1/teams"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "ROUTE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let response = router()
            .await
            .oneshot(get_request("/api/openapi.json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let payload = "x".repeat(DEFAULT_BODY_LIMIT + 1);
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/departments")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(r#"{{"name":"{payload}","department_type":"DEV"}}"#)))
            .unwrap();
        let response = router().await.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_cors_allows_local_origin() {
        let request = Request::builder()
            .uri("/api/v1/health")
            .header(header::ORIGIN, "http://localhost:8080")
            .body(Body::empty())
            .unwrap();
        let response = router().await.oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:8080"
        );
    }
}
