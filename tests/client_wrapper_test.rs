//! Integration tests for the shared HTTP wrapper: interceptor behavior,
//! central error handling, and the global 401 policy.

mod common;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tradectl::api;
use tradectl::router::Navigator;
use tradectl::notify::NoticeLevel;
use tradectl::LogLevel;

#[tokio::test]
async fn test_bearer_token_attached_to_requests() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());
    h.session.set_token("tok-abc").expect("set token");

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "username": "ada", "role": "member"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = api::auth::me(&h.client).await.expect("me");
    assert_eq!(user.username, "ada");
}

/// Matches only requests carrying no Authorization header at all.
struct NoAuthorizationHeader;

impl wiremock::Match for NoAuthorizationHeader {
    fn matches(&self, request: &wiremock::Request) -> bool {
        request.headers.keys().all(|k| k.as_str() != "authorization")
    }
}

#[tokio::test]
async fn test_no_bearer_header_without_token() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/system/health-check"))
        .and(NoAuthorizationHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    api::system::health_check(&h.client).await.expect("health");
    server.verify().await;
}

#[tokio::test]
async fn test_401_clears_session_and_redirects_to_login() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());
    h.session.set_token("tok-stale").expect("set token");

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "token expired"
        })))
        .mount(&server)
        .await;

    let result = api::auth::me(&h.client).await;
    assert!(result.is_err());
    assert!(h.session.token().is_none());
    assert_eq!(h.navigator.current_path(), "/login");
    // The durable copy is gone too.
    use tradectl::store::storage::{TokenStorage, TOKEN_KEY};
    assert!(h.storage.get(TOKEN_KEY).expect("get").is_none());

    let errors = h.notifier.messages_at(NoticeLevel::Error);
    assert_eq!(errors, vec!["token expired".to_string()]);
}

#[tokio::test]
async fn test_server_message_overrides_default_template() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/system/health-check"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "database exploded"
        })))
        .mount(&server)
        .await;

    assert!(api::system::health_check(&h.client).await.is_err());
    let errors = h.notifier.messages_at(NoticeLevel::Error);
    assert_eq!(errors, vec!["database exploded".to_string()]);
}

#[tokio::test]
async fn test_default_template_when_body_has_no_message() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/system/health-check"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(api::system::health_check(&h.client).await.is_err());
    let errors = h.notifier.messages_at(NoticeLevel::Error);
    assert_eq!(errors, vec!["Server error, please try again later".to_string()]);
}

#[tokio::test]
async fn test_transport_failure_classified_as_network() {
    // Nothing listens on the discard port, so no response ever arrives.
    let h = common::harness("http://127.0.0.1:9");

    assert!(api::system::health_check(&h.client).await.is_err());
    let errors = h.notifier.messages_at(NoticeLevel::Error);
    assert_eq!(
        errors,
        vec!["Network connection failed, check your connection".to_string()]
    );
    // A transport failure is not an auth failure: no login redirect.
    assert_eq!(h.navigator.current_path(), "/");
}

#[tokio::test]
async fn test_silent_request_suppresses_notification_but_not_logging() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/system/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(api::system::check_status(&h.client).await.is_err());
    assert!(h.notifier.recorded().is_empty());
    assert!(h
        .logger
        .get_logs()
        .iter()
        .any(|e| e.level == LogLevel::Error && e.message.contains("status=500")));
}

#[tokio::test]
async fn test_empty_success_body_deserializes_to_unit() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());
    h.session.set_token("tok").expect("set token");

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    api::auth::logout(&h.client).await.expect("logout");
}

#[tokio::test]
async fn test_repeated_error_logged_once_but_notified_each_time() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/system/health-check"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "still broken"
        })))
        .mount(&server)
        .await;

    assert!(api::system::health_check(&h.client).await.is_err());
    assert!(api::system::health_check(&h.client).await.is_err());

    // Both failures notify the user.
    assert_eq!(h.notifier.messages_at(NoticeLevel::Error).len(), 2);
    // The identical error message is de-duplicated in the buffer.
    let error_entries: Vec<_> = h
        .logger
        .get_logs()
        .into_iter()
        .filter(|e| e.level == LogLevel::Error)
        .collect();
    assert_eq!(error_entries.len(), 1);
}

#[tokio::test]
async fn test_outbound_traffic_recorded_in_log_buffer() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/system/health-check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    api::system::health_check(&h.client).await.expect("health");

    let logs = h.logger.get_logs();
    let traffic: Vec<_> = logs.iter().filter(|e| e.message == "API request").collect();
    assert_eq!(traffic.len(), 1);
    let details = traffic[0].details.as_ref().expect("details");
    assert_eq!(details["method"], "GET");
    assert_eq!(details["path"], "/system/health-check");
}
