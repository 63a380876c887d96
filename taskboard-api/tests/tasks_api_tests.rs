/// Integration tests for the task endpoints
///
/// Drive the full router (extractors, handlers, services, error mapping)
/// over the in-memory task repository.

mod common;

use axum::http::StatusCode;
use common::{task_uri, TestContext};
use serde_json::json;
use taskboard_shared::db::error::StoreError;
use uuid::Uuid;

#[tokio::test]
async fn test_create_task_defaults() {
    let ctx = TestContext::new();

    let response = ctx.post("/api/v1/tasks", json!({ "title": "X" })).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["title"], "X");
    assert_eq!(response.body["completed"], false);
    assert_eq!(response.body["priority"], "medium");
    assert!(response.body["description"].is_null());
    assert!(response.body["id"].as_str().unwrap().parse::<Uuid>().is_ok());
    assert!(response.body["created_at"].is_string());
    assert!(response.body["updated_at"].is_string());
}

#[tokio::test]
async fn test_create_task_rejects_invalid_priority() {
    let ctx = TestContext::new();

    for priority in [json!(""), json!("p".repeat(21))] {
        let response = ctx
            .post("/api/v1/tasks", json!({ "title": "X", "priority": priority }))
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "validation_error");
        assert_eq!(response.body["details"][0]["field"], "priority");
    }

    assert!(ctx.tasks.is_empty());
}

#[tokio::test]
async fn test_create_task_rejects_invalid_title() {
    let ctx = TestContext::new();

    let response = ctx.post("/api/v1/tasks", json!({ "title": "" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx.post("/api/v1/tasks", json!({ "title": "t".repeat(256) })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx.post("/api/v1/tasks", json!({ "description": "no title" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "bad_request");
}

#[tokio::test]
async fn test_create_task_store_failure_is_400() {
    let ctx = TestContext::new();
    ctx.tasks
        .fail_next(StoreError::Persistent("disk full".to_string()));

    let response = ctx.post("/api/v1/tasks", json!({ "title": "X" })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Failed to create task");
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let ctx = TestContext::new();

    let id = ctx
        .create_task(json!({
            "title": "Buy milk",
            "description": "Two litres",
            "priority": "high",
        }))
        .await;

    let response = ctx.get(&task_uri(id)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id.to_string());
    assert_eq!(response.body["title"], "Buy milk");
    assert_eq!(response.body["description"], "Two litres");
    assert_eq!(response.body["completed"], false);
    assert_eq!(response.body["priority"], "high");
}

#[tokio::test]
async fn test_list_newest_first() {
    let ctx = TestContext::new();

    let a = ctx.create_task(json!({ "title": "A" })).await;
    let b = ctx.create_task(json!({ "title": "B" })).await;
    let c = ctx.create_task(json!({ "title": "C" })).await;

    let response = ctx.get("/api/v1/tasks").await;
    assert_eq!(response.status, StatusCode::OK);

    let ids: Vec<String> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec![c.to_string(), b.to_string(), a.to_string()]);
}

#[tokio::test]
async fn test_list_empty() {
    let ctx = TestContext::new();

    let response = ctx.get("/api/v1/tasks").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_list_store_failure_is_503() {
    let ctx = TestContext::new();
    ctx.tasks
        .fail_next(StoreError::Persistent("relation does not exist".to_string()));

    let response = ctx.get("/api/v1/tasks").await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "service_unavailable");
}

#[tokio::test]
async fn test_get_missing_task() {
    let ctx = TestContext::new();
    let id = Uuid::new_v4();

    let response = ctx.get(&task_uri(id)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["message"],
        format!("Task with id {} not found", id)
    );
}

#[tokio::test]
async fn test_invalid_task_id_is_400() {
    let ctx = TestContext::new();

    for response in [
        ctx.get("/api/v1/tasks/not-a-uuid").await,
        ctx.put("/api/v1/tasks/not-a-uuid", json!({ "title": "Y" })).await,
        ctx.patch("/api/v1/tasks/not-a-uuid/complete", None).await,
        ctx.delete("/api/v1/tasks/not-a-uuid").await,
    ] {
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["message"], "Invalid task ID format");
    }
}

#[tokio::test]
async fn test_transient_store_failure_is_503() {
    let ctx = TestContext::new();
    let id = ctx.create_task(json!({ "title": "X" })).await;
    ctx.tasks
        .fail_next(StoreError::Transient("connection reset by peer".to_string()));

    let response = ctx.get(&task_uri(id)).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.body["message"],
        "Service temporarily unavailable. Please try again later."
    );
}

#[tokio::test]
async fn test_other_store_failure_is_500_without_details() {
    let ctx = TestContext::new();
    let id = ctx.create_task(json!({ "title": "X" })).await;
    ctx.tasks
        .fail_next(StoreError::Persistent("column \"secret\" does not exist".to_string()));

    let response = ctx.delete(&task_uri(id)).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "internal_error");
    assert!(!response.body.to_string().contains("secret"));
}

#[tokio::test]
async fn test_update_partial() {
    let ctx = TestContext::new();
    let id = ctx
        .create_task(json!({ "title": "Write report", "description": "Q3" }))
        .await;

    let response = ctx.put(&task_uri(id), json!({ "priority": "low" })).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["priority"], "low");
    assert_eq!(response.body["title"], "Write report");
    assert_eq!(response.body["description"], "Q3");
    assert_eq!(response.body["completed"], false);
}

#[tokio::test]
async fn test_update_validation_and_missing() {
    let ctx = TestContext::new();
    let id = ctx.create_task(json!({ "title": "X" })).await;

    let response = ctx.put(&task_uri(id), json!({ "title": "" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx.put(&task_uri(Uuid::new_v4()), json!({ "title": "Y" })).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_toggle_completion_scenario() {
    let ctx = TestContext::new();

    let created = ctx.post("/api/v1/tasks", json!({ "title": "X" })).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["completed"], false);
    assert_eq!(created.body["priority"], "medium");
    let id: Uuid = created.body["id"].as_str().unwrap().parse().unwrap();

    let uri = format!("{}/complete", task_uri(id));

    let first = ctx.patch(&uri, None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["completed"], true);

    let second = ctx.patch(&uri, None).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["completed"], false);
}

#[tokio::test]
async fn test_toggle_missing_task() {
    let ctx = TestContext::new();

    let response = ctx
        .patch(&format!("{}/complete", task_uri(Uuid::new_v4())), None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_completion_status() {
    let ctx = TestContext::new();
    let id = ctx.create_task(json!({ "title": "X" })).await;
    let uri = format!("{}/completion-status", task_uri(id));

    let response = ctx.patch(&uri, Some(json!({ "completed": true }))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["completed"], true);

    // Setting is not toggling
    let response = ctx.patch(&uri, Some(json!({ "completed": true }))).await;
    assert_eq!(response.body["completed"], true);

    let response = ctx.patch(&uri, Some(json!({}))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Completed field is required");
}

#[tokio::test]
async fn test_completion_status_checks_existence_first() {
    let ctx = TestContext::new();
    let uri = format!("{}/completion-status", task_uri(Uuid::new_v4()));

    let response = ctx.patch(&uri, Some(json!({}))).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_task() {
    let ctx = TestContext::new();
    let id = ctx.create_task(json!({ "title": "X" })).await;

    let response = ctx.delete(&task_uri(id)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_null());

    let response = ctx.get(&task_uri(id)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_task_is_404() {
    let ctx = TestContext::new();

    let response = ctx.delete(&task_uri(Uuid::new_v4())).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "not_found");
}
