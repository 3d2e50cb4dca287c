//! HTTP executor and streaming connection tests against a mock server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use futures::StreamExt;
use mastodon_api::{
    Client, HttpExecutor, Method, Params, RequestExecutor, StatusParams, StreamingClient,
    Timeline,
};
use mastodon_common::{ClientError, Config, EntityId};
use mastodon_core::{DeletedStatus, StreamEvent, dispatch};
use serde_json::json;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::oneshot,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path, query_param},
};

fn test_config(mock_server: &MockServer) -> Config {
    let mut config = Config::new(mock_server.uri());
    config.instance.access_token = Some("test_token".into());
    config
}

#[tokio::test]
async fn test_get_sends_query_and_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/1/statuses"))
        .and(query_param("limit", "5"))
        .and(header("Authorization", "Bearer test_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "2", "content": "second" },
            { "id": "1", "content": "first" }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(&test_config(&mock_server)).unwrap();
    let statuses = client
        .statuses(1_u64, Params::new().with("limit", 5_u32))
        .await
        .unwrap();

    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].content, "second");
}

#[tokio::test]
async fn test_post_sends_form_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/statuses"))
        .and(body_string(
            "media_ids%5B%5D=1&media_ids%5B%5D=2&status=hello+world",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "10",
            "content": "<p>hello world</p>"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(&test_config(&mock_server)).unwrap();
    let options = Params::new().with("media_ids", vec![1_u64, 2]);
    let status = client
        .create_status("hello world", StatusParams::from(options))
        .await
        .unwrap();

    assert_eq!(status.id, EntityId::from(10_u64));
}

#[tokio::test]
async fn test_empty_body_is_absent_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/statuses/3"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let executor = HttpExecutor::new(&test_config(&mock_server)).unwrap();
    let response = executor
        .perform(Method::DELETE, "/api/v1/statuses/3", &Params::new())
        .await
        .unwrap();
    assert!(response.is_none());

    let client = Client::new(&test_config(&mock_server)).unwrap();
    assert!(!client.destroy_status(3_u64).await.unwrap());
}

#[tokio::test]
async fn test_slash_in_id_stays_in_one_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = Client::new(&test_config(&mock_server)).unwrap();
    assert!(client.destroy_status("1/favourite").await.unwrap());

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/api/v1/statuses/1%2Ffavourite");
}

#[tokio::test]
async fn test_error_status_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/statuses/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Record not found" })),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new(&test_config(&mock_server)).unwrap();
    let err = client.status(404_u64).await.unwrap_err();

    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Record not found"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/statuses/1/favourite"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = Client::new(&test_config(&mock_server)).unwrap();
    let err = client.favourite(1_u64).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_stream_end_to_end() {
    let mock_server = MockServer::start().await;

    let body = concat!(
        ":thump\n\n",
        "event: update\n",
        "data: {\"id\":\"1\",\"content\":\"hi\"}\n\n",
        "event: delete\n",
        "data: 1\n\n",
        "event: filters_changed\n",
        "data: {}\n\n",
        "event: notification\n",
        "data: {\"id\":\"5\",\"type\":\"reblog\"}\n\n",
    );

    Mock::given(method("GET"))
        .and(path("/api/v1/streaming/hashtag"))
        .and(query_param("tag", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&mock_server)
        .await;

    let streaming = StreamingClient::new(&test_config(&mock_server)).unwrap();
    let messages = streaming
        .connect(&Timeline::Hashtag("rust".into()))
        .await
        .unwrap();

    let mut events = Vec::new();
    let summary = dispatch(messages, |event| events.push(event)).await;

    assert_eq!(summary.recognized, 3);
    assert_eq!(summary.unrecognized, 1);
    assert!(matches!(&events[0], StreamEvent::Update(s) if s.content == "hi"));
    assert_eq!(events[1], StreamEvent::Delete(DeletedStatus::new(1_u64)));
    assert!(matches!(&events[2], StreamEvent::Unrecognized { tag } if tag == "filters_changed"));
    assert!(matches!(&events[3], StreamEvent::Notification(_)));
}

#[tokio::test]
async fn test_stream_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/streaming/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "The access token is invalid"
        })))
        .mount(&mock_server)
        .await;

    let streaming = StreamingClient::new(&test_config(&mock_server)).unwrap();
    let err = streaming.connect(&Timeline::User).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_stream_items_arrive_in_order() {
    let mock_server = MockServer::start().await;

    let body: String = (1..=20)
        .map(|i| format!("event: delete\ndata: {i}\n\n"))
        .collect();

    Mock::given(method("GET"))
        .and(path("/api/v1/streaming/public"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&mock_server)
        .await;

    let streaming = StreamingClient::new(&test_config(&mock_server)).unwrap();
    let messages: Vec<_> = streaming
        .connect(&Timeline::Public)
        .await
        .unwrap()
        .collect()
        .await;

    let ids: Vec<_> = messages.iter().map(|m| m.payload.clone()).collect();
    assert_eq!(ids, (1..=20).map(|i| json!(i)).collect::<Vec<_>>());
}

/// Serve one streaming response that only ever sends heartbeats, and report
/// when the client hangs up.
async fn heartbeat_server() -> (String, oneshot::Receiver<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (closed_tx, closed_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let (mut reader, mut writer) = socket.into_split();

        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = reader.read(&mut buf).await.unwrap();
            assert!(n > 0, "client hung up before sending a request");
            request.extend_from_slice(&buf[..n]);
        }

        writer
            .write_all(
                b"HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n",
            )
            .await
            .unwrap();

        let mut heartbeat = tokio::time::interval(Duration::from_millis(20));
        loop {
            tokio::select! {
                _ = heartbeat.tick() => {
                    if writer.write_all(b":thump\n\n").await.is_err() {
                        break;
                    }
                }
                read = reader.read(&mut buf) => {
                    if matches!(read, Ok(0) | Err(_)) {
                        break;
                    }
                }
            }
        }
        let _ = closed_tx.send(());
    });

    (format!("http://{addr}"), closed_rx)
}

#[tokio::test]
async fn test_dropping_stream_closes_quiet_connection() {
    let (base_url, closed) = heartbeat_server().await;

    let streaming = StreamingClient::new(&Config::new(base_url)).unwrap();
    let mut messages = streaming.connect(&Timeline::Public).await.unwrap();

    // Heartbeats never surface as messages.
    let next = tokio::time::timeout(Duration::from_millis(100), messages.next()).await;
    assert!(next.is_err());

    drop(messages);

    tokio::time::timeout(Duration::from_secs(5), closed)
        .await
        .expect("connection still open after the stream was dropped")
        .unwrap();
}
