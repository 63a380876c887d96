/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::postgres(pool, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_shared::{
    repositories::{
        task::{PgTaskRepository, TaskRepository},
        user::{PgUserRepository, UserRepository},
    },
    services::{task::TaskService, user::UserService},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Every field is reference-counted, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Task service
    pub tasks: TaskService,

    /// User service
    pub users: UserService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state over any repository implementations
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        users: Arc<dyn UserRepository>,
        config: Config,
    ) -> Self {
        Self {
            tasks: TaskService::new(tasks),
            users: UserService::new(users),
            config: Arc::new(config),
        }
    }

    /// Creates application state backed by PostgreSQL
    pub fn postgres(pool: PgPool, config: Config) -> Self {
        Self::new(
            Arc::new(PgTaskRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
            config,
        )
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /                               # Welcome message
/// ├── GET /health                         # Liveness probe
/// ├── /api/v1/tasks
/// │   ├── GET    /                        # List tasks, newest first
/// │   ├── POST   /                        # Create task
/// │   ├── GET    /:id                     # Get task
/// │   ├── PUT    /:id                     # Partial update
/// │   ├── DELETE /:id                     # Delete task
/// │   ├── PATCH  /:id/complete            # Toggle completion
/// │   └── PATCH  /:id/completion-status   # Set completion
/// └── /auth
///     ├── POST /signup
///     ├── POST /signin
///     └── POST /signout
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check));

    let task_routes = Router::new()
        .route(
            "/",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/:id/complete", patch(routes::tasks::toggle_task_completion))
        .route(
            "/:id/completion-status",
            patch(routes::tasks::update_task_completion_status),
        );

    let auth_routes = Router::new()
        .route("/signup", post(routes::auth::signup))
        .route("/signin", post(routes::auth::signin))
        .route("/signout", post(routes::auth::signout));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    let production = state.config.api.production;

    Router::new()
        .merge(health_routes)
        .nest("/api/v1/tasks", task_routes)
        .nest("/auth", auth_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(production))
        .with_state(state)
}
