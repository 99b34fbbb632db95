mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use shortcode_service::routes::api_router;

/// Create, create again, update, delete.
#[tokio::test]
async fn test_mapping_lifecycle() {
    let pool = common::create_test_pool().await;
    let server = TestServer::new(api_router(common::create_test_state(pool.clone()))).unwrap();

    let first: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/a" }))
        .await
        .json();
    let code = common::code_from_short_url(first["short_url"].as_str().unwrap());

    let again: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/a" }))
        .await
        .json();
    assert_eq!(again["short_url"], first["short_url"]);
    assert_eq!(common::count_mappings(&pool).await, 1);

    server
        .put(&format!("/update/{}", code))
        .json(&json!({ "new_url": "https://example.com/b" }))
        .await
        .assert_status_ok();
    assert_eq!(
        server.get(&format!("/{}", code)).await.header("location"),
        "https://example.com/b"
    );

    // The old URL no longer dedups to this code.
    let fresh: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/a" }))
        .await
        .json();
    assert_ne!(fresh["short_url"], first["short_url"]);

    server
        .delete(&format!("/delete/{}", code))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/{}", code))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .put(&format!("/update/{}", code))
        .json(&json!({ "new_url": "https://example.com/c" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
