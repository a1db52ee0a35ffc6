//! HTTP API integration tests.
//!
//! Tests for REST API endpoints (health check, room list, connection list).

mod fixtures;
use fixtures::{TestServer, recv_json, send_text};

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_rooms_empty_without_sign_in() {
    // テスト項目: サインインしていない接続だけならルーム一覧は空
    // given (前提条件):
    let server = TestServer::start().await;
    let _ws = server.connect().await;

    // when (操作):
    let body: serde_json::Value = reqwest::get(format!("{}/api/rooms", server.base_url()))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    // then (期待する結果):
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_rooms_list_endpoint() {
    // テスト項目: /api/rooms がサインイン済みのルームとユーザーを返す
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    send_text(&mut alice, r#"{"action":"SIGN_IN","room":"lobby","user":"alice"}"#).await;
    recv_json(&mut alice).await;
    send_text(&mut bob, r#"{"action":"SIGN_IN","room":"lobby","user":"bob"}"#).await;
    recv_json(&mut bob).await;

    // when (操作):
    let body: serde_json::Value = reqwest::get(format!("{}/api/rooms", server.base_url()))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    // then (期待する結果):
    let rooms = body.as_array().expect("Response should be an array");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["room"], "lobby");
    assert_eq!(rooms[0]["users"], serde_json::json!(["alice", "bob"]));
    assert_eq!(rooms[0]["member_count"], 2);
}

#[tokio::test]
async fn test_connections_endpoint() {
    // テスト項目: /api/connections が接続ごとの情報を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let _lurker = server.connect().await;
    send_text(&mut alice, r#"{"action":"SIGN_IN","room":"lobby","user":"alice"}"#).await;
    recv_json(&mut alice).await;

    // when (操作):
    let body: serde_json::Value =
        reqwest::get(format!("{}/api/connections", server.base_url()))
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON");

    // then (期待する結果): 接続順に並び、未サインインの接続は room/user が null
    let connections = body.as_array().expect("Response should be an array");
    assert_eq!(connections.len(), 2);
    assert_eq!(connections[0]["id"], 1);
    assert_eq!(connections[0]["room"], "lobby");
    assert_eq!(connections[0]["user"], "alice");
    assert!(connections[0]["address"].as_str().unwrap().starts_with("127.0.0.1:"));
    assert!(connections[0]["connected_at"].is_string());
    assert_eq!(connections[1]["id"], 2);
    assert!(connections[1]["room"].is_null());
    assert!(connections[1]["user"].is_null());
}
