mod common;

use serde_json::Value;

#[tokio::test]
async fn test_index_describes_api() {
    let server = common::create_test_server().await;

    let response = server.get("/").await;

    response.assert_status_ok();
    let message = response.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(message.contains("POST /shorten"));
    assert!(message.contains("GET /{code}"));
}
