//! Integration tests for the guarded router: rule order, the first-run
//! status probe, and supersession of stale navigations.

mod common;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tradectl::notify::NoticeLevel;
use tradectl::router::Navigator;
use tradectl::router::guard::RouteDecision;
use tradectl::LogLevel;

#[tokio::test]
async fn test_unauthenticated_navigation_redirects_to_login() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());

    let decision = h.router.navigate("/trade/orders").await.expect("navigate");
    assert_eq!(decision, RouteDecision::Redirect("/login".to_string()));
    assert_eq!(h.navigator.current_path(), "/login");
}

#[tokio::test]
async fn test_authenticated_navigation_is_allowed() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());
    common::sign_in(&h, "member");

    let decision = h.router.navigate("/trade/orders").await.expect("navigate");
    assert_eq!(decision, RouteDecision::Allow);
    assert_eq!(h.navigator.current_path(), "/trade/orders");
}

#[tokio::test]
async fn test_login_page_with_session_redirects_home() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());
    common::sign_in(&h, "member");

    let decision = h.router.navigate("/login").await.expect("navigate");
    assert_eq!(decision, RouteDecision::Redirect("/".to_string()));
}

#[tokio::test]
async fn test_login_page_without_session_is_allowed() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());

    let decision = h.router.navigate("/login").await.expect("navigate");
    assert_eq!(decision, RouteDecision::Allow);
}

#[tokio::test]
async fn test_admin_route_denied_for_member_with_notice() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());
    common::sign_in(&h, "member");

    let decision = h.router.navigate("/admin/users").await.expect("navigate");
    assert_eq!(decision, RouteDecision::Redirect("/".to_string()));
    assert_eq!(
        h.notifier.messages_at(NoticeLevel::Error),
        vec!["Administrator privileges required".to_string()]
    );
}

#[tokio::test]
async fn test_admin_route_allowed_for_admin() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());
    common::sign_in(&h, "admin");

    let decision = h.router.navigate("/admin/users").await.expect("navigate");
    assert_eq!(decision, RouteDecision::Allow);
    assert!(h.notifier.recorded().is_empty());
}

#[tokio::test]
async fn test_initialize_page_allowed_when_uninitialized() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/system/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"initialized": false})))
        .mount(&server)
        .await;

    let decision = h
        .router
        .navigate("/system/initialize")
        .await
        .expect("navigate");
    assert_eq!(decision, RouteDecision::Allow);
    assert!(!h.system.initialized());
    assert_eq!(h.navigator.current_path(), "/system/initialize");
}

#[tokio::test]
async fn test_initialize_page_redirects_home_when_already_initialized() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/system/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"initialized": true})))
        .mount(&server)
        .await;

    let decision = h
        .router
        .navigate("/system/initialize")
        .await
        .expect("navigate");
    assert_eq!(decision, RouteDecision::Redirect("/".to_string()));
    assert!(h.system.initialized());
    assert_eq!(
        h.notifier.messages_at(NoticeLevel::Warning),
        vec!["System is already initialized".to_string()]
    );
}

#[tokio::test]
async fn test_initialize_probe_failure_fails_closed_to_login() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/system/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let decision = h
        .router
        .navigate("/system/initialize")
        .await
        .expect("navigate");
    assert_eq!(decision, RouteDecision::Redirect("/login".to_string()));
    assert_eq!(h.navigator.current_path(), "/login");
    assert!(h
        .logger
        .get_logs()
        .iter()
        .any(|e| e.level == LogLevel::Error && e.message.contains("status check failed")));
}

#[tokio::test]
async fn test_unknown_route_is_an_error() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());

    let result = h.router.navigate("/no/such/page").await;
    assert!(result.is_err());
    // Nothing moved.
    assert_eq!(h.navigator.history(), vec!["/".to_string()]);
}

#[tokio::test]
async fn test_stale_navigation_is_superseded_by_newer_one() {
    let server = MockServer::start().await;
    let h = common::harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/system/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"initialized": false}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let (first, second) = tokio::join!(h.router.navigate("/system/initialize"), async {
        // Start the second attempt while the first still awaits the probe.
        tokio::time::sleep(Duration::from_millis(50)).await;
        h.router.navigate("/system/initialize").await
    });

    assert_eq!(first.expect("first"), RouteDecision::Superseded);
    assert_eq!(second.expect("second"), RouteDecision::Allow);

    // Only the winning navigation was committed.
    let visits = h
        .navigator
        .history()
        .into_iter()
        .filter(|p| p == "/system/initialize")
        .count();
    assert_eq!(visits, 1);
}
