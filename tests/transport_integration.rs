//! Integration tests for the HTTP transport.
//!
//! Exercises request encoding and response decoding against a local mock server.

use linkprobe_core::transport::{
    HttpMethod, HttpTransport, Transport, TransportConfig, TransportError, TransportRequest,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, Request, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

fn transport() -> HttpTransport {
    HttpTransport::new().unwrap()
}

#[tokio::test]
async fn test_post_sends_json_body_with_headers() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let payload = json!([{"a": "g", "p": "abcdefgh"}]);
    let expected_len = serde_json::to_string(&payload).unwrap().len().to_string();

    Mock::given(method("POST"))
        .and(path("/cs"))
        .and(header("content-type", "application/json"))
        .and(header("content-length", expected_len.as_str()))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_string("-9"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = transport()
        .request(TransportRequest::post_json(
            format!("{}/cs", mock_server.uri()),
            payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, "-9");
}

#[tokio::test]
async fn test_get_never_sends_body() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/file"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = TransportRequest::get(format!("{}/file", mock_server.uri()))
        .with_payload(json!({"ignored": true}));
    let response = transport().request(request).await.unwrap();
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_empty_payload_is_not_sent() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("PUT"))
        .and(path("/empty"))
        .respond_with(|req: &Request| {
            let has_type = req.headers.contains_key("content-type");
            ResponseTemplate::new(200).set_body_string(format!("{}:{has_type}", req.body.len()))
        })
        .mount(&mock_server)
        .await;

    let request = TransportRequest::new(HttpMethod::Put, format!("{}/empty", mock_server.uri()))
        .with_payload(json!({}));
    let response = transport().request(request).await.unwrap();
    assert_eq!(response.body, "0:false");
}

#[tokio::test]
async fn test_response_headers_are_collected() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/headers"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("X-Probe", "one")
                .append_header("X-Probe", "two")
                .set_body_string("body"),
        )
        .mount(&mock_server)
        .await;

    let response = transport()
        .request(TransportRequest::get(format!("{}/headers", mock_server.uri())).verbose(true))
        .await
        .unwrap();

    assert_eq!(response.headers.get_all("x-probe"), ["one", "two"]);
    assert_eq!(response.headers.get("X-PROBE"), Some("one"));
}

#[tokio::test]
async fn test_non_success_status_is_returned_not_raised() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let response = transport()
        .request(TransportRequest::get(mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(response.status, 503);
    assert!(response.is_empty());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::with_config(TransportConfig {
        connect_timeout_secs: 1,
        read_timeout_secs: 1,
    })
    .unwrap();
    let err = transport
        .request(TransportRequest::get(mock_server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Timeout { .. }), "got {err:?}");
    assert!(err.is_connection_failure());
}

#[tokio::test]
async fn test_unreachable_host_is_connection_failure() {
    // Port 9 (discard) is closed on test hosts; the connect is refused.
    let err = transport()
        .request(TransportRequest::get("http://127.0.0.1:9/"))
        .await
        .unwrap_err();
    assert!(err.is_connection_failure(), "got {err:?}");
}

#[tokio::test]
async fn test_malformed_url_is_rejected_before_sending() {
    let err = transport()
        .request(TransportRequest::get("not a url"))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::InvalidUrl { .. }));
}
