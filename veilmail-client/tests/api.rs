//! End-to-end behaviour against a mock VeilMail API over real HTTP.

use serde_json::json;
use std::time::Duration;
use veilmail_client::{
    ClientError, ClientOptions, ErrorKind, ListParams, ReqwestClient, SendEmail, VeilMail,
};
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

const KEY: &str = "veil_test_integration";

fn client(server: &MockServer) -> VeilMail<ReqwestClient> {
    VeilMail::with_options(
        KEY,
        ClientOptions {
            base_url: Some(server.uri()),
            timeout: Some(Duration::from_secs(5)),
        },
    )
    .unwrap()
}

async fn error_server(status: u16, body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn send_single_recipient_as_list() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/emails"))
        .and(matchers::header("authorization", format!("Bearer {KEY}").as_str()))
        .and(matchers::header("user-agent", veilmail_api::USER_AGENT))
        .and(matchers::header("content-type", "application/json"))
        .and(matchers::body_json(json!({
            "from": "hello@acme.dev",
            "to": ["user@example.com"],
            "subject": "Hi",
            "html": "<p>Hi</p>",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "em_1", "status": "queued"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let email = SendEmail::new("hello@acme.dev", "user@example.com", "Hi").html("<p>Hi</p>");
    let sent = client(&server).emails().send(&email).await.unwrap();

    assert_eq!(sent.get("id"), Some(&json!("em_1")));
}

#[tokio::test]
async fn send_many_recipients_in_order() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/emails"))
        .and(matchers::body_partial_json(json!({
            "to": ["c@x.io", "a@x.io", "b@x.io"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "em_2"})))
        .expect(1)
        .mount(&server)
        .await;

    let email = SendEmail::new("hello@acme.dev", ["c@x.io", "a@x.io", "b@x.io"], "Hi");
    client(&server).emails().send(&email).await.unwrap();
}

#[tokio::test]
async fn invalid_key_never_reaches_the_network() {
    let server = MockServer::start().await;

    let err = VeilMail::with_options(
        "sk_live_nope",
        ClientOptions {
            base_url: Some(server.uri()),
            timeout: None,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ClientError::InvalidApiKey));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_query_and_data_passthrough() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/v1/domains"))
        .and(matchers::query_param("limit", "2"))
        .and(matchers::query_param_is_missing("cursor"))
        .and(matchers::header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "d_1"}, {"id": "d_2"}],
            "hasMore": true,
            "nextCursor": "d_2",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .domains()
        .list(&ListParams::default().limit(2))
        .await
        .unwrap();

    assert_eq!(page.get("hasMore"), Some(&json!(true)));
    assert_eq!(page["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn get_unwraps_data_object() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/v1/domains/d_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "d_1", "domain": "acme.dev", "status": "verified"},
        })))
        .mount(&server)
        .await;

    let domain = client(&server).domains().get("d_1").await.unwrap();
    assert_eq!(domain.get("domain"), Some(&json!("acme.dev")));
}

#[tokio::test]
async fn no_content_yields_empty_mapping() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("DELETE"))
        .and(matchers::path("/v1/webhooks/wh_1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let out = client(&server).webhooks().delete("wh_1").await.unwrap();
    assert!(out.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn subscriber_export_returns_csv() {
    let server = MockServer::start().await;
    let csv = "email,status\nada@example.com,active\n";

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/v1/audiences/aud_1/subscribers/export"))
        .and(matchers::query_param("status", "active"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(csv)
                .insert_header("content-type", "text/csv"),
        )
        .mount(&server)
        .await;

    let out = client(&server)
        .subscribers()
        .export("aud_1", &json!({"status": "active"}))
        .await
        .unwrap();
    assert_eq!(out, csv);
}

#[tokio::test]
async fn error_statuses_dispatch_to_kinds() {
    let cases = [
        (401, ErrorKind::Authentication),
        (403, ErrorKind::Forbidden),
        (404, ErrorKind::NotFound),
        (400, ErrorKind::Validation),
        (500, ErrorKind::Server),
        (502, ErrorKind::Server),
        (503, ErrorKind::Server),
        (409, ErrorKind::Generic),
    ];

    for (status, expected) in cases {
        let server = error_server(
            status,
            json!({"error": {"message": format!("failed with {status}"), "code": "some_code"}}),
        )
        .await;

        let err = client(&server).emails().get("em_1").await.unwrap_err();
        assert_eq!(err.kind, expected, "status {status}");
        assert_eq!(err.status, Some(status));
        assert_eq!(err.message, format!("failed with {status}"));
        assert_eq!(err.code.as_deref(), Some("some_code"));
    }
}

#[tokio::test]
async fn rate_limit_carries_retry_after() {
    let server = error_server(
        429,
        json!({"error": {"message": "Slow down", "code": "rate_limited", "retryAfter": 30}}),
    )
    .await;

    let err = client(&server).emails().get("em_1").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::RateLimit { retry_after: Some(30) });
    assert!(err.is_transient());
}

#[tokio::test]
async fn unprocessable_with_pii_and_without() {
    let server = error_server(
        422,
        json!({"error": {
            "message": "PII detected",
            "code": "pii_detected",
            "piiTypes": ["EMAIL_ADDRESS", "PHONE_NUMBER"],
        }}),
    )
    .await;
    let err = client(&server)
        .emails()
        .send(&SendEmail::new("a@acme.dev", "b@x.io", "s"))
        .await
        .unwrap_err();
    assert_eq!(
        err.pii_types(),
        Some(&["EMAIL_ADDRESS".to_string(), "PHONE_NUMBER".to_string()][..])
    );

    let server = error_server(422, json!({"message": "Unprocessable", "code": "bad"})).await;
    let err = client(&server).emails().get("em_1").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Generic);
    assert_eq!(err.message, "Unprocessable");
}

#[tokio::test]
async fn non_json_error_body_is_generic() {
    let server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server).emails().get("em_1").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Generic);
    assert_eq!(err.status, Some(502));
}

#[tokio::test]
async fn timeout_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = VeilMail::with_options(
        KEY,
        ClientOptions {
            base_url: Some(server.uri()),
            timeout: Some(Duration::from_millis(50)),
        },
    )
    .unwrap();

    let err = client.emails().get("em_1").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(err.status, None);
    assert!(err.message.starts_with("Network error"));
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    let client = VeilMail::with_options(
        KEY,
        ClientOptions {
            base_url: Some("http://127.0.0.1:1".to_string()),
            timeout: Some(Duration::from_secs(2)),
        },
    )
    .unwrap();

    let err = client.domains().get("d_1").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
}
