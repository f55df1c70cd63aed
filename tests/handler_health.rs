mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (server, _state) = common::create_test_server();

    let response = server.get("/healthz").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["ok"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json.get("message").is_none());
}
