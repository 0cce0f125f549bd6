//! Integration tests for the default reqwest transport.
//!
//! These tests run the client against a local mock server to verify what
//! actually goes over the wire and how real responses and network failures
//! are surfaced.

use eventbrite_api::{
    BaseUrl, ClientConfig, ClientError, ConfigError, EventbriteClient, Headers, Params,
    RequestBody, RequestOptions, ReqwestTransport, ResponseBody, TransportFailure,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client whose base URL points at `{server}/v3/`.
fn create_client(server_uri: &str) -> EventbriteClient {
    let config = ClientConfig::builder()
        .base_url(BaseUrl::new(format!("{server_uri}/v3/")).unwrap())
        .build()
        .unwrap();
    EventbriteClient::with_config("valid_token", config).unwrap()
}

#[tokio::test]
async fn test_get_sends_bearer_token_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/users/me/owned_events/"))
        .and(header("authorization", "Bearer valid_token"))
        .and(header("accept", "application/json"))
        .and(query_param("status", "live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [{"id": "100", "name": {"text": "Launch"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri());
    let params = Params::from([("status".to_string(), "live".to_string())]);

    let response = client
        .get("users/me/owned_events/", Some(params), None, None, None)
        .await
        .unwrap()
        .into_normalized()
        .unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(response.json().unwrap()["events"][0]["id"], "100");
}

#[tokio::test]
async fn test_patch_sends_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v3/events/42/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"event": {"capacity": 250}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "42"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri());
    let body = RequestBody::from(json!({"event": {"capacity": 250}}));

    let response = client
        .patch("events/42/", None, Some(body), None, None)
        .await
        .unwrap();

    assert!(response.is_ok());
}

#[tokio::test]
async fn test_per_call_headers_reach_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v3/webhooks/7/"))
        .and(header("x-request-id", "req-456"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri());
    let headers = Headers::from([("X-Request-Id".to_string(), "req-456".to_string())]);

    let response = client
        .delete("webhooks/7/", None, None, Some(headers), None)
        .await
        .unwrap()
        .into_normalized()
        .unwrap();

    assert_eq!(response.code, 204);
    assert_eq!(response.body, ResponseBody::Text(String::new()));
}

#[tokio::test]
async fn test_not_found_comes_back_as_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/events/0/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status_code": 404,
            "error": "NOT_FOUND",
            "error_description": "The event you requested does not exist."
        })))
        .mount(&server)
        .await;

    let client = create_client(&server.uri());

    let response = client.get("events/0/", None, None, None, None).await.unwrap();

    assert_eq!(response.code(), 404);
    assert!(!response.is_ok());
    assert_eq!(
        response.as_normalized().unwrap().json().unwrap()["error"],
        "NOT_FOUND"
    );
}

#[tokio::test]
async fn test_html_body_and_repeated_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/endpoint/"))
        .respond_with(
            ResponseTemplate::new(201)
                .append_header("set-cookie", "a=1")
                .append_header("set-cookie", "b=2")
                .set_body_raw("<html></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let client = create_client(&server.uri());

    let response = client
        .post("endpoint/", None, None, None, None)
        .await
        .unwrap()
        .into_normalized()
        .unwrap();

    assert_eq!(response.code, 201);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(
        response.headers.get("set-cookie"),
        Some(&vec!["a=1".to_string(), "b=2".to_string()])
    );
    assert_eq!(response.body, ResponseBody::Text("<html></html>".to_string()));
}

#[tokio::test]
async fn test_can_connect_against_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/users/me/"))
        .and(header("authorization", "Bearer valid_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1"})))
        .mount(&server)
        .await;

    let client = create_client(&server.uri());
    assert!(client.can_connect().await.unwrap());

    let raw = client.last_response().unwrap();
    assert_eq!(raw.status, 200);
    assert_eq!(raw.protocol_version, "1.1");
}

#[tokio::test]
async fn test_unsupported_protocol_version_is_a_transport_failure() {
    let server = MockServer::start().await;
    let client = create_client(&server.uri());

    let options = RequestOptions::new().protocol_version("3");
    let result = client
        .get("users/me/", None, None, None, Some(options))
        .await;

    match result {
        Err(ClientError::Transport(e)) => assert!(matches!(
            e.source,
            TransportFailure::UnsupportedProtocolVersion { ref version } if version == "3"
        )),
        other => panic!("Expected Transport error, got: {other:?}"),
    }
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_http2_is_rejected_before_sending() {
    let server = MockServer::start().await;
    let client = create_client(&server.uri());

    for version in ["2", "2.0"] {
        let options = RequestOptions::new().protocol_version(version);
        let result = client
            .get("users/me/", None, None, None, Some(options))
            .await;

        match result {
            Err(ClientError::Transport(e)) => assert!(matches!(
                e.source,
                TransportFailure::UnsupportedProtocolVersion { .. }
            )),
            other => panic!("Expected Transport error, got: {other:?}"),
        }
    }
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_http10_request_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/users/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri());
    let options = RequestOptions::new().protocol_version("1.0");

    let response = client
        .get("users/me/", None, None, None, Some(options))
        .await
        .unwrap();

    assert_eq!(response.code(), 200);
}

#[tokio::test]
async fn test_token_with_newline_fails_construction() {
    let server = MockServer::start().await;
    let config = ClientConfig::builder()
        .base_url(BaseUrl::new(format!("{}/v3/", server.uri())).unwrap())
        .build()
        .unwrap();

    let result = EventbriteClient::with_config("abc123\n", config);

    assert!(matches!(result, Err(ConfigError::InvalidToken)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_invalid_per_call_header_is_not_sent() {
    let server = MockServer::start().await;
    let client = create_client(&server.uri());
    let headers = Headers::from([("X-Trace".to_string(), "a\nb".to_string())]);

    let result = client
        .get("users/me/", None, None, Some(headers), None)
        .await;

    assert!(matches!(
        result,
        Err(ClientError::InvalidHeader { ref name }) if name == "X-Trace"
    ));
    assert!(client.last_request().is_none());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_per_call_query_overrides_endpoint_query_on_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/users/me/orders/"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"orders": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri());
    let params = Params::from([("page".to_string(), "3".to_string())]);

    let response = client
        .get("users/me/orders/?page=2", Some(params), None, None, None)
        .await
        .unwrap();
    assert!(response.is_ok());

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), Some("page=3"));
}

#[tokio::test]
async fn test_preconfigured_reqwest_client_is_used() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/users/me/"))
        .and(header("x-proxy-tag", "edge-1"))
        .and(header("authorization", "Bearer valid_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut proxy_headers = reqwest::header::HeaderMap::new();
    proxy_headers.insert(
        "x-proxy-tag",
        reqwest::header::HeaderValue::from_static("edge-1"),
    );
    let http = reqwest::Client::builder()
        .default_headers(proxy_headers)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let config = ClientConfig::builder()
        .base_url(BaseUrl::new(format!("{}/v3/", server.uri())).unwrap())
        .transport(Arc::new(ReqwestTransport::with_client(http)))
        .build()
        .unwrap();
    let client = EventbriteClient::with_config("valid_token", config).unwrap();

    assert!(client.can_connect().await.unwrap());
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = create_client(&format!("http://127.0.0.1:{port}"));

    let result = client.get("users/me/", None, None, None, None).await;

    match result {
        Err(ClientError::Transport(e)) => {
            assert!(matches!(e.source, TransportFailure::Network(_)));
            assert_eq!(e.request.url.port(), Some(port));
        }
        other => panic!("Expected Transport error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_is_a_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/reports/attendees/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(BaseUrl::new(format!("{}/v3/", server.uri())).unwrap())
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let client = EventbriteClient::with_config("valid_token", config).unwrap();

    let result = client
        .get("reports/attendees/", None, None, None, None)
        .await;

    match result {
        Err(ClientError::Transport(e)) => match e.source {
            TransportFailure::Network(err) => assert!(err.is_timeout()),
            other => panic!("Expected Network failure, got: {other:?}"),
        },
        other => panic!("Expected Transport error, got: {other:?}"),
    }
}
