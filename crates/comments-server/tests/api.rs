use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use comments_server::routes::create_router;
use comments_server::store::CommentStore;

fn test_app(dir: &TempDir) -> Router {
    create_router(CommentStore::new(dir.path().join("comments.json")))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn comment_lifecycle_over_http() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    // Create
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/comments/p1",
        Some(json!({ "userName": "a", "content": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["userName"], json!("a"));
    assert_eq!(body["data"]["edited"], json!(false));
    let id = body["data"]["id"].as_str().expect("id present").to_string();

    // Read back
    let (status, body) = send(&app, Method::GET, "/api/comments/p1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["id"], json!(id.clone()));
    assert_eq!(body["data"][0]["content"], json!("hi"));

    // Edit
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/comments/p1/{id}"),
        Some(json!({ "content": "bye" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["content"], json!("bye"));
    assert_eq!(body["data"]["edited"], json!(true));
    assert!(body["data"]["lastEditTime"].is_i64());

    // Delete, then the product is empty again
    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/comments/p1/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let (status, body) = send(&app, Method::GET, "/api/comments/p1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn create_with_missing_fields_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/comments/p1",
        Some(json!({ "userName": "a" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Username and content are required"));

    // Blank content counts as missing too.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/comments/p1",
        Some(json!({ "userName": "a", "content": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_requires_content_and_unknown_comment_is_404() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let unknown = Uuid::new_v4();
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/comments/p1/{unknown}"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Content is required"));

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/comments/p1/{unknown}"),
        Some(json!({ "content": "bye" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Comment not found"));
}

#[tokio::test]
async fn delete_unknown_comment_is_404() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/comments/p1/{}", Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn list_all_returns_newest_first_with_product_ids() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    send(
        &app,
        Method::POST,
        "/api/comments/p1",
        Some(json!({ "userName": "a", "content": "first" })),
    )
    .await;
    // Distinct millisecond timestamps keep the expected order unambiguous.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    send(
        &app,
        Method::POST,
        "/api/comments/p2",
        Some(json!({ "userName": "b", "content": "second" })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/comments/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(2));
    assert_eq!(body["data"][0]["content"], json!("second"));
    assert_eq!(body["data"][0]["productId"], json!("p2"));
    assert_eq!(body["data"][1]["content"], json!("first"));
    assert_eq!(body["data"][1]["productId"], json!("p1"));

    // The aggregate listing answers with and without the trailing slash.
    let (status, body) = send(&app, Method::GET, "/api/comments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(2));
}

#[tokio::test]
async fn malformed_comment_id_gets_the_not_found_envelope() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/comments/p1/not-a-uuid",
        Some(json!({ "content": "bye" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Comment not found"));

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/api/comments/p1/not-a-uuid",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Comment not found"));
}

#[tokio::test]
async fn rating_is_stored_and_returned_verbatim() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/comments/p1",
        Some(json!({ "userName": "a", "content": "hi", "RatingVal": 4.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["RatingVal"], json!(4.5));

    let (_, body) = send(&app, Method::GET, "/api/comments/p1", None).await;
    assert_eq!(body["data"][0]["RatingVal"], json!(4.5));
}

#[tokio::test]
async fn health_check_responds() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
