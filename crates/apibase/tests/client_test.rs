// Integration tests for `ApiClient` using wiremock: the uniform
// status/transport-to-error mapping and session header handling.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use apibase::{ApiClient, ApiError, Session, SessionHandle, TransportConfig};

#[derive(Debug, Deserialize, PartialEq)]
struct Greeting {
    message: String,
}

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let transport = TransportConfig::new(server.uri().parse().unwrap());
    let client = ApiClient::new(&transport, SessionHandle::new()).unwrap();
    (server, client)
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn get_decodes_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/greeting"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "hello" })))
        .mount(&server)
        .await;

    let greeting: Greeting = client.get("greeting").await.unwrap();
    assert_eq!(greeting.message, "hello");
}

#[tokio::test]
async fn bearer_token_is_attached_when_session_present() {
    let server = MockServer::start().await;
    let session = SessionHandle::new();
    session.install(Session::new("u-1", None, "tok-abc".into()));
    let transport = TransportConfig::new(server.uri().parse().unwrap());
    let client = ApiClient::new(&transport, session).unwrap();

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let _: Greeting = client.get("me").await.unwrap();
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn unauthorized_maps_to_session_expired_and_clears_session() {
    let server = MockServer::start().await;
    let session = SessionHandle::new();
    session.install(Session::new("u-1", None, "stale".into()));
    let transport = TransportConfig::new(server.uri().parse().unwrap());
    let client = ApiClient::new(&transport, session.clone()).unwrap();

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.get::<Greeting>("me").await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn client_error_carries_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clinics/nope"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "no such clinic" })),
        )
        .mount(&server)
        .await;

    let err = client.get::<Greeting>("clinics/nope").await.unwrap_err();
    assert!(
        matches!(err, ApiError::Http { status: 404, ref message } if message == "no such clinic")
    );
}

#[tokio::test]
async fn server_error_maps_to_server_kind() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/greeting"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.get::<Greeting>("greeting").await.unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 503 }));
}

#[tokio::test]
async fn malformed_body_maps_to_decode() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/greeting"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.get::<Greeting>("greeting").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn slow_response_maps_to_timeout() {
    let server = MockServer::start().await;
    let transport = TransportConfig::new(server.uri().parse().unwrap())
        .with_timeout(Duration::from_millis(100));
    let client = ApiClient::new(&transport, SessionHandle::new()).unwrap();

    Mock::given(method("GET"))
        .and(path("/greeting"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = client.get::<Greeting>("greeting").await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout));
}

#[tokio::test]
async fn delete_discards_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/conversations/c1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete("conversations/c1").await.unwrap();
}
