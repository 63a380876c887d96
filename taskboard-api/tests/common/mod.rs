//! Common test utilities for integration tests
//!
//! Builds the full router over in-memory repositories, so these tests need
//! no database. The repositories are kept on the context for seeding,
//! inspection and fault injection.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config, DatabaseConfig};
use taskboard_shared::models::user::UserChanges;
use taskboard_shared::repositories::memory::{MemoryTaskRepository, MemoryUserRepository};
use taskboard_shared::repositories::user::UserRepository;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: axum::Router,
    pub tasks: Arc<MemoryTaskRepository>,
    pub users: Arc<MemoryUserRepository>,
}

/// Status and parsed JSON body of a response (`Value::Null` when empty)
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
        },
        log_level: "debug".to_string(),
    }
}

impl TestContext {
    /// Creates a new test context with empty stores
    pub fn new() -> Self {
        let tasks = Arc::new(MemoryTaskRepository::new());
        let users = Arc::new(MemoryUserRepository::new());

        let state = AppState::new(tasks.clone(), users.clone(), test_config());

        Self {
            app: build_router(state),
            tasks,
            users,
        }
    }

    /// Sends a request with an optional JSON body
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .call(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Option<Value>) -> TestResponse {
        self.request(Method::PATCH, uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Creates a task through the API and returns its ID
    pub async fn create_task(&self, body: Value) -> Uuid {
        let response = self.post("/api/v1/tasks", body).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"].as_str().unwrap().parse().unwrap()
    }

    /// Signs up a user through the API and returns its ID
    pub async fn signup(&self, email: &str, username: &str, password: &str) -> Uuid {
        let response = self
            .post(
                "/auth/signup",
                serde_json::json!({
                    "email": email,
                    "username": username,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"].as_str().unwrap().parse().unwrap()
    }

    /// Deactivates a user directly in the store
    pub async fn deactivate(&self, id: Uuid) {
        self.users
            .update(
                id,
                UserChanges {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
    }
}

pub fn task_uri(id: Uuid) -> String {
    format!("/api/v1/tasks/{}", id)
}
