mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::JwtValidator;
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::comments::{routes as comments_routes, CommentService};
use crate::features::ideas::{routes as ideas_routes, IdeaService};
use crate::features::notifications::{routes as notifications_routes, NotificationService};
use crate::features::reviews::{routes as reviews_routes, ReviewService};
use crate::features::users::{routes as users_routes, UserManagementService};
use crate::features::votes::{routes as votes_routes, VoteService};
use axum::{middleware::from_fn, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

/// API routes with the optional-auth layer applied.
///
/// Every request carrying a bearer token is validated here; role checks
/// happen in the handlers' guards.
fn api_routes(pool: PgPool, validator: Arc<JwtValidator>) -> Router {
    let idea_service = Arc::new(IdeaService::new(pool.clone()));
    let review_service = Arc::new(ReviewService::new(
        pool.clone(),
        Arc::clone(&idea_service),
    ));
    let category_service = Arc::new(CategoryService::new(pool.clone()));
    let comment_service = Arc::new(CommentService::new(pool.clone()));
    let vote_service = Arc::new(VoteService::new(pool.clone()));
    let notification_service = Arc::new(NotificationService::new(pool.clone()));
    let user_management_service = Arc::new(UserManagementService::new(pool));

    Router::new()
        .merge(categories_routes::routes(Arc::clone(&category_service)))
        .merge(ideas_routes::routes(idea_service))
        .merge(comments_routes::routes(comment_service))
        .merge(votes_routes::routes(vote_service))
        .merge(reviews_routes::routes(review_service))
        .merge(notifications_routes::routes(notification_service))
        .nest(
            "/api/usermanagement",
            users_routes::routes(user_management_service),
        )
        .nest(
            "/api/admin",
            categories_routes::admin_routes(category_service),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            validator,
            middleware::auth_middleware,
        ))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let jwt_validator = Arc::new(JwtValidator::new(&config.auth));
    tracing::info!(
        "Auth configuration initialized (issuer: {})",
        config.auth.issuer
    );

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let api = api_routes(pool, jwt_validator);
    tracing::info!("Idea board services initialized");

    let app = Router::new()
        .merge(swagger)
        .merge(api)
        .merge(health_route())
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Simple health check endpoint (no auth required)
fn health_route() -> Router {
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    Router::new().route("/health", axum::routing::get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::UserRole;
    use crate::shared::test_helpers::{
        create_user, issue_token, lazy_pool, test_auth_config, with_user,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use uuid::Uuid;

    /// Every request in these tests is decided before a query would run
    fn server() -> TestServer {
        let config = test_auth_config();
        let app = api_routes(lazy_pool(), Arc::new(JwtValidator::new(&config)))
            .merge(health_route());
        TestServer::new(app).unwrap()
    }

    fn token(role: UserRole) -> String {
        issue_token(&test_auth_config(), &Uuid::new_v4().to_string(), &role.to_string())
    }

    #[tokio::test]
    async fn test_health_needs_no_token() {
        server().get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_employee_routes_require_a_token() {
        let response = server().get("/api/idea/all").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_roles_are_not_hierarchical() {
        let server = server();

        server
            .get("/api/idea/all")
            .authorization_bearer(token(UserRole::Manager))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .get("/api/review/ideas")
            .authorization_bearer(token(UserRole::Admin))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .get("/api/usermanagement/users")
            .authorization_bearer(token(UserRole::Manager))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .post("/api/admin/categories")
            .authorization_bearer(token(UserRole::Employee))
            .json(&json!({ "name": "Process" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected_even_on_public_routes() {
        let server = server();

        server
            .get("/api/categories")
            .authorization_bearer("not-a-token")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .get("/api/categories")
            .add_header(
                axum::http::header::AUTHORIZATION,
                axum::http::HeaderValue::from_static("Basic dXNlcjpwYXNz"),
            )
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_downvote_without_comment_is_rejected() {
        let server = server();
        let path = format!("/api/vote/{}/downvote", Uuid::new_v4());

        let response = server
            .post(&path)
            .authorization_bearer(token(UserRole::Employee))
            .json(&json!({ "commentText": "   " }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["message"],
            json!("Comment is mandatory when downvoting. Please provide a reason for your downvote.")
        );

        server
            .post(&path)
            .authorization_bearer(token(UserRole::Manager))
            .json(&json!({}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_voting_requires_a_token() {
        server()
            .post(&format!("/api/vote/{}/upvote", Uuid::new_v4()))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_idea_submission_is_validated() {
        let response = server()
            .post("/api/idea/submit")
            .authorization_bearer(token(UserRole::Employee))
            .json(&json!({
                "title": "Hi",
                "description": "Short",
                "category_id": Uuid::new_v4(),
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));

        server()
            .post("/api/idea/submit")
            .authorization_bearer(token(UserRole::Employee))
            .json(&json!({
                "title": "    x",
                "description": "A long enough description",
                "category_id": Uuid::new_v4(),
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_review_submission_is_validated() {
        let server = server();
        let manager = token(UserRole::Manager);

        let response = server
            .post("/api/review/submit")
            .authorization_bearer(manager.clone())
            .json(&json!({
                "idea_id": Uuid::new_v4(),
                "feedback": "  ",
                "decision": "Approve",
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], json!("Feedback is required"));

        let response = server
            .post("/api/review/submit")
            .authorization_bearer(manager)
            .json(&json!({
                "idea_id": Uuid::new_v4(),
                "feedback": "Looks promising",
                "decision": "Maybe",
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["message"],
            json!("Invalid decision. Valid values are: Approve, Reject")
        );
    }

    #[tokio::test]
    async fn test_unknown_status_strings_are_rejected() {
        let server = server();

        server
            .get("/api/review/ideas/status/Archived")
            .authorization_bearer(token(UserRole::Manager))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .put(&format!("/api/review/ideas/{}/status", Uuid::new_v4()))
            .authorization_bearer(token(UserRole::Manager))
            .json(&json!({ "status": "Rejected" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .get("/api/usermanagement/users/role/Owner")
            .authorization_bearer(token(UserRole::Admin))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_category_request_is_validated() {
        server()
            .post("/api/admin/categories")
            .authorization_bearer(token(UserRole::Admin))
            .json(&json!({ "name": "   " }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_injected_identity_passes_through_the_auth_layer() {
        let config = test_auth_config();
        let app = with_user(
            api_routes(lazy_pool(), Arc::new(JwtValidator::new(&config))),
            create_user(UserRole::Employee),
        );
        let server = TestServer::new(app).unwrap();

        server
            .get("/api/review/manager/my-reviews")
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .post(&format!("/api/comment/{}", Uuid::new_v4()))
            .json(&json!({ "text": "" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reading_reviews_needs_no_token() {
        let server = server();

        for path in [
            format!("/api/review/{}", Uuid::new_v4()),
            format!("/api/review/idea/{}", Uuid::new_v4()),
        ] {
            let status = server.get(&path).await.status_code();
            assert_ne!(status, StatusCode::UNAUTHORIZED, "{}", path);
            assert_ne!(status, StatusCode::FORBIDDEN, "{}", path);
        }

        let status = server
            .get(&format!("/api/review/idea/{}", Uuid::new_v4()))
            .authorization_bearer(token(UserRole::Employee))
            .await
            .status_code();
        assert_ne!(status, StatusCode::FORBIDDEN);

        server
            .put(&format!("/api/review/{}", Uuid::new_v4()))
            .json(&json!({ "feedback": "Looks good", "decision": "Approved" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
