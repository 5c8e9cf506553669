//! The token-refresh state machine, driven end to end against a stub server:
//! one refresh per burst of failures, replay with the new token, forced
//! sign-out when the refresh token is missing or rejected, and no retry
//! loops.

use campuswatch_client::storage::SessionStorage;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{alice, client_for, signed_in_storage};

#[tokio::test]
async fn concurrent_failures_share_one_refresh() {
    let server = MockServer::start().await;

    // The old token is rejected, the new one accepted.
    Mock::given(method("GET"))
        .and(path("/incidents/"))
        .and(header("authorization", "Bearer at1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/incidents/"))
        .and(header("authorization", "Bearer at2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .and(body_json(json!({"refresh": "rt1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "at2"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), signed_in_storage("at1", Some("rt1")));

    let (first, second) = tokio::join!(client.incidents(), client.incidents());
    assert!(first.is_ok(), "first call should succeed after refresh");
    assert!(second.is_ok(), "second call should succeed after refresh");

    assert_eq!(client.session().access_token().as_deref(), Some("at2"));
    assert!(client.session().is_authenticated());
    // The user snapshot survives the refresh untouched.
    assert_eq!(client.session().user().unwrap().id, alice().id);
}

#[tokio::test]
async fn failed_refresh_signs_out_and_fails_all_waiters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/incidents/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Token is blacklisted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let storage = signed_in_storage("at1", Some("rt1"));
    let client = client_for(&server.uri(), storage.clone());
    let mut changes = client.session().subscribe();

    let (first, second) = tokio::join!(client.incidents(), client.incidents());
    for result in [first.map(|_| ()), second.map(|_| ())] {
        let err = result.expect_err("both calls must fail when refresh fails");
        assert!(!err.to_string().is_empty());
    }

    assert!(!client.session().is_authenticated());
    assert!(client.session().refresh_token().is_none());
    assert!(
        storage.load().unwrap().is_none(),
        "persisted session should be removed on forced sign-out"
    );
    assert!(changes.has_changed().unwrap());
    assert!(!changes.borrow_and_update().is_authenticated());
}

#[tokio::test]
async fn replayed_request_is_not_retried_a_second_time() {
    let server = MockServer::start().await;

    // Every GET is rejected, even with the fresh token.
    Mock::given(method("GET"))
        .and(path("/incidents/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Nope"})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "at2"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), signed_in_storage("at1", Some("rt1")));

    let err = client.incidents().await.expect_err("must give up after one replay");
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Nope");
}

#[tokio::test]
async fn missing_refresh_token_skips_the_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/incidents/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "at2"})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), signed_in_storage("at1", None));

    let err = client.incidents().await.expect_err("no refresh token, no recovery");
    assert!(!err.to_string().is_empty());
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn forbidden_triggers_refresh_like_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/incidents/my-reports/"))
        .and(header("authorization", "Bearer at1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Forbidden"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/incidents/my-reports/"))
        .and(header("authorization", "Bearer at2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "at2"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), signed_in_storage("at1", Some("rt1")));
    assert!(client.my_reports().await.is_ok());
}

#[tokio::test]
async fn refresh_exchange_is_side_effect_free() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .and(body_json(json!({"refresh": "rt1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "at9"})))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), signed_in_storage("at1", Some("rt1")));

    let token = client.exchange_refresh_token("rt1").await.unwrap();
    assert_eq!(token, "at9");
    // The exchange alone must not touch the session.
    assert_eq!(client.session().access_token().as_deref(), Some("at1"));
}
